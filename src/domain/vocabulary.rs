// src/domain/vocabulary.rs
//! Word tables, templates and filler banks consumed by the extractor, the
//! composers, the rewrite passes and the validator.
//!
//! Templates use `{subject}`, `{phrase}` and `{link}` placeholders. Density
//! sentences also take `{article}`, the lowercase article agreeing with the subject.
use serde::{Deserialize, Serialize};

use crate::domain::article::text::phrase_words;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTemplate {
    pub href: String,
    pub anchor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandSite {
    pub brand: String,
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerSection {
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
    pub list_items: Vec<String>,
    pub sections: Vec<FillerSection>,
    pub internal_link: LinkTemplate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCatalog {
    pub internal_domain: String,
    pub product_base_url: String,
    pub brand_sites: Vec<BrandSite>,
    pub internal_link_sentence: String,
    pub external_link_sentence: String,
    pub buy_link_sentence: String,
    pub buy_anchor: String,
}

impl LinkCatalog {
    pub fn is_internal(&self, href: &str) -> bool {
        href.to_lowercase().contains(&self.internal_domain.to_lowercase())
    }

    pub fn is_external(&self, href: &str) -> bool {
        let href = href.to_lowercase();
        (href.starts_with("http://") || href.starts_with("https://")) && !self.is_internal(&href)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub stopwords: Vec<String>,
    pub brands: Vec<String>,
    pub generic_category_noun: String,
    pub generic_subject: String,
    pub fallback_keyphrase: String,
    pub qualifiers: Vec<String>,
    pub title_extensions: Vec<String>,
    pub meta_fallback: String,
    pub meta_ctas: Vec<String>,
    pub meta_short_pad: String,
    pub transition_words: Vec<String>,
    pub split_transitions: Vec<String>,
    pub injected_transitions: Vec<String>,
    pub opener_alternates: Vec<String>,
    pub conjunctions: Vec<String>,
    pub lead_clause: String,
    pub heading_suffix: String,
    pub passive_to_active: Vec<(String, String)>,
    pub density_sentences: Vec<String>,
    pub dilution_paragraphs: Vec<String>,
    pub transliteration: Vec<(char, String)>,
    pub categories: Vec<Category>,
    pub default_category: Category,
    pub links: LinkCatalog,
}

fn words(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

impl Vocabulary {
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.iter().any(|s| s == word)
    }

    pub fn is_brand(&self, word: &str) -> bool {
        self.brands.iter().any(|b| b == word)
    }

    /// Transition words split into normalized word sequences.
    pub fn transition_patterns(&self) -> Vec<Vec<String>> {
        self.transition_words
            .iter()
            .map(|t| phrase_words(t))
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// First category whose keywords appear in the phrase, then in the subject.
    pub fn category_for(&self, phrase: &str, subject: &str) -> &Category {
        [phrase, subject]
            .iter()
            .find_map(|text| {
                let tokens = phrase_words(text);
                self.categories
                    .iter()
                    .find(|c| c.keywords.iter().any(|k| tokens.contains(k)))
            })
            .unwrap_or(&self.default_category)
    }

    /// Official site of the first brand named in the phrase or subject, else the
    /// first entry of the table.
    pub fn brand_site_for(&self, phrase: &str, subject: &str) -> Option<&BrandSite> {
        let tokens: Vec<String> = phrase_words(phrase)
            .into_iter()
            .chain(phrase_words(subject))
            .collect();
        self.links
            .brand_sites
            .iter()
            .find(|site| tokens.iter().any(|t| *t == site.brand))
            .or_else(|| self.links.brand_sites.first())
    }

    pub fn transliterate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match self.transliteration.iter().find(|(from, _)| *from == ch) {
                Some((_, to)) => out.push_str(to),
                None => out.push(ch),
            }
        }
        out
    }

    /// Brazilian Portuguese bank for an office-supplies catalogue.
    pub fn pt_br() -> Self {
        Self {
            stopwords: words(&[
                "a", "o", "as", "os", "e", "de", "da", "do", "das", "dos", "com", "para",
                "em", "na", "no", "nas", "nos", "um", "uma", "uns", "umas", "que", "como",
                "ou", "mas", "se", "por", "pela", "pelo", "até", "sem", "sob", "sobre",
                "the", "and", "for", "with", "of",
            ]),
            brands: words(&[
                "hp", "canon", "epson", "brother", "samsung", "lexmark", "xerox", "ricoh",
                "kyocera",
            ]),
            generic_category_noun: "impressora".into(),
            generic_subject: "produto".into(),
            fallback_keyphrase: "produto".into(),
            qualifiers: words(&[
                "nova", "pro", "premium", "atualizada", "completa", "v2", "especial",
                "definitiva", "avançada", "plus", "max",
            ]),
            title_extensions: words(&[" - Análise Completa", " e Guia de Compra", " | Review"]),
            meta_fallback: "Conheça {phrase} e suas principais características.".into(),
            meta_ctas: words(&[
                " Confira características e benefícios.",
                " Ideal para escritório e empresas.",
                " Descubra especificações e vantagens.",
                " Saiba mais sobre funcionalidades.",
            ]),
            meta_short_pad: " Confira!".into(),
            transition_words: words(&[
                "além disso", "portanto", "por fim", "no entanto", "dessa forma",
                "desse modo", "consequentemente", "por exemplo", "também", "assim",
                "ainda", "ainda assim", "por outro lado", "em seguida", "logo", "enfim",
                "contudo", "porém", "todavia", "entretanto", "ou seja", "por isso",
                "em resumo", "em suma", "afinal", "primeiramente", "sobretudo",
                "da mesma forma", "inclusive", "vale destacar", "é importante notar",
                "nesse contexto",
            ]),
            split_transitions: words(&["Além disso", "Dessa forma", "Também", "Ainda"]),
            injected_transitions: words(&[
                "Além disso,", "Portanto,", "Dessa forma,", "Consequentemente,",
                "Por outro lado,", "Ainda assim,",
            ]),
            opener_alternates: words(&[
                "Além disso,", "Por outro lado,", "Vale destacar que",
                "É importante notar que", "Nesse contexto,", "Dessa forma,",
            ]),
            conjunctions: words(&[
                "e", "mas", "porém", "contudo", "entretanto", "todavia", "porque", "quando",
            ]),
            lead_clause: "é uma excelente opção para quem busca qualidade e desempenho.".into(),
            heading_suffix: "Características Principais".into(),
            passive_to_active: vec![
                ("é oferecido por".into(), "oferece".into()),
                ("são oferecidos por".into(), "oferecem".into()),
                ("são utilizados".into(), "utilizam".into()),
                ("é utilizado".into(), "utiliza".into()),
                ("pode ser usado".into(), "você pode usar".into()),
                ("pode ser utilizado".into(), "você pode utilizar".into()),
                ("foi desenvolvido".into(), "desenvolvemos".into()),
                ("foi projetado".into(), "projetamos".into()),
                ("foi criado".into(), "criamos".into()),
                ("é considerado".into(), "consideramos".into()),
                ("é recomendado".into(), "recomendamos".into()),
                ("é indicado".into(), "indicamos".into()),
            ],
            density_sentences: words(&[
                "Além disso, {article} {phrase} oferece excelente custo-benefício.",
                "Por isso, {article} {phrase} é uma escolha segura para o escritório.",
                "Dessa forma, {article} {phrase} acompanha bem a rotina de trabalho.",
                "Portanto, vale considerar {article} {phrase} na próxima compra.",
            ]),
            dilution_paragraphs: words(&[
                "Escolher o equipamento certo depende do perfil de uso de cada escritório. Além disso, vale comparar garantia, suporte e disponibilidade de suprimentos. Dessa forma, a compra atende às necessidades reais da equipe.",
                "Um bom planejamento de compras evita gastos desnecessários ao longo do ano. Por isso, acompanhe o volume mensal de impressões. Assim, fica mais fácil prever a reposição de materiais.",
                "A manutenção preventiva prolonga a vida útil de qualquer equipamento de escritório. Também ajuda a manter a qualidade constante dos documentos. Portanto, reserve alguns minutos por mês para os cuidados básicos.",
                "Atendimento especializado faz diferença na hora de tirar dúvidas técnicas. Por outro lado, manuais e materiais de apoio facilitam o uso diário. Consequentemente, a equipe aproveita melhor os recursos disponíveis.",
            ]),
            transliteration: [
                ('à', "a"), ('á', "a"), ('â', "a"), ('ã', "a"), ('ä', "a"), ('å', "a"),
                ('è', "e"), ('é', "e"), ('ê', "e"), ('ë', "e"),
                ('ì', "i"), ('í', "i"), ('î', "i"), ('ï', "i"),
                ('ò', "o"), ('ó', "o"), ('ô', "o"), ('õ', "o"), ('ö', "o"),
                ('ù', "u"), ('ú', "u"), ('û', "u"), ('ü', "u"),
                ('ç', "c"), ('ñ', "n"),
            ]
            .into_iter()
            .map(|(from, to)| (from, to.to_string()))
            .collect(),
            categories: vec![
                multifunction_category(),
                toner_category(),
                paper_category(),
                printer_category(),
            ],
            default_category: default_category(),
            links: LinkCatalog {
                internal_domain: "creativecopias.com.br".into(),
                product_base_url: "https://creativecopias.com.br/produto/".into(),
                brand_sites: vec![
                    brand_site("hp", "https://www.hp.com/br-pt/", "site oficial da HP"),
                    brand_site("canon", "https://www.canon.com.br/", "site oficial da Canon"),
                    brand_site("epson", "https://epson.com.br/", "site oficial da Epson"),
                    brand_site("brother", "https://www.brother.com.br/", "site oficial da Brother"),
                    brand_site("samsung", "https://www.samsung.com/br/", "site oficial da Samsung"),
                    brand_site("xerox", "https://www.xerox.com.br/", "site oficial da Xerox"),
                ],
                internal_link_sentence: "Para mais opções, confira {link}.".into(),
                external_link_sentence: "Consulte também o {link} para informações adicionais."
                    .into(),
                buy_link_sentence: "Para adquirir, acesse {link}.".into(),
                buy_anchor: "Comprar {subject}".into(),
            },
        }
    }
}

fn brand_site(brand: &str, url: &str, label: &str) -> BrandSite {
    BrandSite {
        brand: brand.into(),
        url: url.into(),
        label: label.into(),
    }
}

fn link(href: &str, anchor: &str) -> LinkTemplate {
    LinkTemplate {
        href: href.into(),
        anchor: anchor.into(),
    }
}

fn section(heading: &str, paragraphs: &[&str], list: &[&str]) -> FillerSection {
    FillerSection {
        heading: heading.into(),
        paragraphs: words(paragraphs),
        list: words(list),
    }
}

fn shared_sections() -> Vec<FillerSection> {
    vec![
        section(
            "Especificações técnicas de {subject}",
            &[
                "As especificações de {subject} mostram um conjunto equilibrado para uso profissional. Por exemplo, a resolução de impressão garante textos nítidos e gráficos bem definidos. Ainda assim, o equipamento mantém dimensões compactas e cabe em qualquer mesa.",
                "O ciclo mensal atende escritórios com volume moderado de documentos. Além disso, a bandeja comporta folhas suficientes para longas tarefas sem interrupção. Consequentemente, a equipe perde menos tempo com reposição.",
            ],
            &[
                "Resolução de impressão elevada",
                "Ciclo mensal compatível com escritórios",
                "Bandeja de papel ampla",
                "Dimensões compactas",
            ],
        ),
        section(
            "Comparativo de {subject} com modelos concorrentes",
            &[
                "Na comparação com modelos da mesma faixa de preço, {subject} se destaca pela confiabilidade. No entanto, cada escritório deve avaliar o volume de impressão antes da compra. Por isso, vale analisar o rendimento dos suprimentos e a disponibilidade de peças.",
                "Os concorrentes diretos trazem recursos parecidos, mas nem sempre com o mesmo suporte técnico. Em resumo, garantia, rede de assistência e custo operacional tornam a escolha mais segura. Assim, o investimento se paga ao longo dos meses.",
            ],
            &[
                "Garantia e rede de assistência",
                "Custo operacional competitivo",
                "Suprimentos fáceis de encontrar",
            ],
        ),
        section(
            "Dicas de uso e manutenção de {subject}",
            &[
                "Manter {subject} em bom estado exige cuidados simples no dia a dia. Primeiramente, prefira suprimentos originais ou certificados. Em seguida, mantenha o equipamento longe de poeira e umidade.",
                "Uma limpeza periódica evita falhas e prolonga a vida útil das peças. Da mesma forma, atualizar o firmware garante acesso a melhorias de desempenho. Por fim, registre a compra para aproveitar todo o suporte do fabricante.",
            ],
            &[
                "Use suprimentos originais",
                "Limpe o equipamento periodicamente",
                "Mantenha o firmware atualizado",
            ],
        ),
    ]
}

fn category(
    name: &str,
    keywords: &[&str],
    list_items: &[&str],
    lead: FillerSection,
    internal_link: LinkTemplate,
) -> Category {
    let mut sections = vec![lead];
    sections.extend(shared_sections());
    Category {
        name: name.into(),
        keywords: words(keywords),
        list_items: words(list_items),
        sections,
        internal_link,
    }
}

fn printer_category() -> Category {
    category(
        "impressora",
        &["impressora", "impressoras", "laserjet", "deskjet", "officejet", "pixma", "ecotank", "laser"],
        &[
            "Impressão rápida e silenciosa",
            "Baixo custo por página",
            "Conectividade com a rede do escritório",
            "Painel de controle intuitivo",
            "Compatível com os principais sistemas operacionais",
            "Economia de energia no modo de espera",
        ],
        section(
            "Vantagens de escolher {subject} para o escritório",
            &[
                "Escolher {subject} significa investir em um equipamento pensado para a rotina de quem imprime todos os dias. Além disso, o modelo combina velocidade de impressão com consumo de energia controlado. Dessa forma, o custo por página permanece previsível mesmo em meses de alta demanda.",
                "A instalação é simples e o painel de controle é intuitivo. Também vale lembrar que a conexão com a rede facilita o compartilhamento entre vários usuários. Portanto, o equipamento se adapta bem a pequenas e médias equipes.",
            ],
            &[
                "Impressão rápida e silenciosa",
                "Baixo custo por página",
                "Conectividade com a rede do escritório",
                "Painel de controle intuitivo",
            ],
        ),
        link(
            "https://blog.creativecopias.com.br/categoria/impressoras/",
            "nossa seleção de impressoras",
        ),
    )
}

fn multifunction_category() -> Category {
    category(
        "multifuncional",
        &["multifuncional", "multifuncionais", "copiadora", "scanner"],
        &[
            "Impressão, cópia e digitalização em um só equipamento",
            "Alimentador automático de documentos",
            "Digitalização direta para e-mail",
            "Economia de espaço no escritório",
            "Conexão Wi-Fi e rede cabeada",
            "Painel de controle intuitivo",
        ],
        section(
            "Impressão, cópia e digitalização com {subject}",
            &[
                "Reunir impressão, cópia e digitalização em {subject} libera espaço e simplifica a rotina. Além disso, um único equipamento reduz contratos de manutenção e compras de suprimentos. Dessa forma, a gestão do escritório fica mais enxuta.",
                "O alimentador automático agiliza a digitalização de documentos com várias páginas. Também é possível enviar arquivos digitalizados diretamente para o e-mail ou para a nuvem. Portanto, o fluxo de documentos ganha velocidade.",
            ],
            &[
                "Impressão, cópia e digitalização",
                "Alimentador automático de documentos",
                "Envio direto para e-mail",
            ],
        ),
        link(
            "https://blog.creativecopias.com.br/categoria/multifuncionais/",
            "nossas multifuncionais",
        ),
    )
}

fn toner_category() -> Category {
    category(
        "toner",
        &["toner", "toners", "cartucho", "cartuchos", "tinta", "refil", "cilindro"],
        &[
            "Alto rendimento por cartucho",
            "Páginas com qualidade uniforme",
            "Instalação rápida e sem ferramentas",
            "Compatibilidade garantida com a impressora",
            "Menor custo por página",
            "Armazenamento simples",
        ],
        section(
            "Rendimento e qualidade de {subject}",
            &[
                "O suprimento {subject} entrega páginas uniformes do início ao fim do cartucho. Além disso, o rendimento declarado ajuda a planejar as compras do mês. Assim, o escritório evita paradas inesperadas por falta de suprimento.",
                "A troca do cartucho leva poucos segundos e não exige ferramentas. Por outro lado, armazenar o toner em local fresco preserva a qualidade do pó. Consequentemente, cada página mantém o mesmo padrão de nitidez.",
            ],
            &[
                "Alto rendimento por cartucho",
                "Troca rápida e sem ferramentas",
                "Qualidade uniforme até o fim",
            ],
        ),
        link(
            "https://blog.creativecopias.com.br/categoria/suprimentos/",
            "nossa linha de suprimentos",
        ),
    )
}

fn paper_category() -> Category {
    category(
        "papel",
        &["papel", "sulfite", "resma", "resmas", "folhas", "etiqueta", "etiquetas"],
        &[
            "Gramatura adequada para o dia a dia",
            "Superfície uniforme",
            "Menos atolamentos na impressora",
            "Alta alvura para textos nítidos",
            "Embalagem que protege da umidade",
            "Compatível com impressoras laser e jato de tinta",
        ],
        section(
            "Qualidade de impressão com {subject}",
            &[
                "Um bom papel faz diferença no resultado final de qualquer impressão. Por exemplo, {subject} traz gramatura adequada para documentos do dia a dia. Além disso, a superfície uniforme reduz atolamentos na impressora.",
                "Guardar as resmas em local seco evita que as folhas absorvam umidade. Da mesma forma, manter a embalagem fechada até o uso preserva o alinhamento das folhas. Portanto, o rendimento de cada resma fica garantido.",
            ],
            &[
                "Gramatura adequada",
                "Superfície uniforme",
                "Menos atolamentos",
            ],
        ),
        link(
            "https://blog.creativecopias.com.br/categoria/suprimentos/",
            "nossa linha de suprimentos",
        ),
    )
}

fn default_category() -> Category {
    category(
        "geral",
        &[],
        &[
            "Boa relação custo-benefício",
            "Qualidade comprovada",
            "Garantia do fabricante",
            "Suporte técnico especializado",
            "Entrega para todo o Brasil",
            "Ideal para escritórios e empresas",
        ],
        section(
            "Por que escolher {subject}",
            &[
                "Escolher {subject} é uma decisão que une qualidade e praticidade para o escritório. Além disso, o produto conta com garantia do fabricante e suporte especializado. Dessa forma, a compra traz segurança desde o primeiro dia.",
                "Cada detalhe foi pensado para facilitar a rotina de trabalho. Também é simples encontrar peças e suprimentos compatíveis. Portanto, o investimento continua rendendo por muito tempo.",
            ],
            &[
                "Boa relação custo-benefício",
                "Garantia do fabricante",
                "Suporte técnico especializado",
            ],
        ),
        link("https://blog.creativecopias.com.br/", "nosso blog de dicas e análises"),
    )
}
