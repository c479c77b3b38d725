// tests/support/builders.rs
use seo_forge::domain::article::ArticleDraft;

const SENTENCES: &[&str] = &[
    "O equipamento chega bem embalado e a instalação leva poucos minutos.",
    "O painel frontal mostra o status de cada tarefa com clareza.",
    "A bandeja principal aceita folhas de gramaturas variadas sem travar.",
    "Em uso contínuo o ruído fica abaixo do esperado para a categoria.",
    "A conexão pela rede do escritório funciona logo na primeira tentativa.",
    "O consumo de energia em espera é baixo e ajuda na conta do mês.",
];

/// `paragraphs` paragraphs of six plain sentences each.
pub fn sample_body(paragraphs: usize) -> String {
    let paragraph = format!("<p>{}</p>", SENTENCES.join(" "));
    paragraph.repeat(paragraphs)
}

pub struct DraftBuilder {
    draft: ArticleDraft,
}

impl DraftBuilder {
    pub fn new(subject: &str) -> Self {
        Self {
            draft: ArticleDraft::new(subject, sample_body(3)),
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.draft.body = body.into();
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.draft.title = Some(title.to_string());
        self
    }

    pub fn meta(mut self, meta: &str) -> Self {
        self.draft.meta_description = Some(meta.to_string());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.draft.tags = Some(tags.iter().map(|t| (*t).to_string()).collect());
        self
    }

    pub fn build(self) -> ArticleDraft {
        self.draft
    }
}

/// Drafts with unrelated subjects so each reserves its own keyphrase.
pub fn distinct_drafts(count: usize) -> Vec<ArticleDraft> {
    (0..count)
        .map(|i| DraftBuilder::new(&format!("Epson EcoTank L{}", 3000 + i * 10)).build())
        .collect()
}
