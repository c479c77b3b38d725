// src/application/transform/sentences.rs
//! Sentence-level passes: length, transition ratio and opener variety.
use super::{BodyPass, PassContext};
use crate::domain::article::text::{Sentence, join_sentences, split_sentences, strip_tags};
use crate::domain::article::{Block, Body};
use crate::domain::selection::VariantCursor;

const SPLIT_SALT: u64 = 0x5e17;
const TRANSITION_SALT: u64 = 0x7a25;
const OPENER_SALT: u64 = 0x09e1;
const MAX_SPLIT_DEPTH: usize = 16;

fn map_paragraphs(body: Body, mut rewrite: impl FnMut(Vec<Sentence>) -> Vec<Sentence>) -> Body {
    let blocks = body
        .into_blocks()
        .into_iter()
        .map(|block| match block {
            Block::Paragraph(text) => Block::Paragraph(join_sentences(&rewrite(split_sentences(&text)))),
            other => other,
        })
        .collect();
    Body::from_blocks(blocks)
}

fn has_transition(sentence: &Sentence, patterns: &[Vec<String>]) -> bool {
    patterns.iter().any(|pattern| sentence.contains_words(pattern))
}

/// Splits sentences longer than the word limit, continuing each split with a
/// transition word.
pub struct SentenceLengthPass;

impl SentenceLengthPass {
    /// `(head_end, tail_start)` token indices for one split.
    fn split_point(tokens: &[String], ctx: &PassContext<'_>) -> (usize, usize) {
        let len = tokens.len();
        let lo = ctx.rules.split_window_start.max(1);
        let hi = ctx.rules.split_window_end.min(len.saturating_sub(3));
        if lo <= hi {
            let conjunction = (lo..=hi).find(|&i| {
                let word = tokens[i].to_lowercase();
                ctx.vocabulary.conjunctions.iter().any(|c| *c == word)
            });
            if let Some(i) = conjunction {
                return (i, i + 1);
            }
            let comma = (lo..=hi).find(|&i| strip_tags(&tokens[i - 1]).trim_end().ends_with(','));
            if let Some(i) = comma {
                return (i, i);
            }
        }
        let mid = (len / 2).max(1);
        (mid, mid)
    }

    fn split(
        &self,
        sentence: Sentence,
        ctx: &PassContext<'_>,
        cursor: &mut VariantCursor,
        depth: usize,
    ) -> Vec<Sentence> {
        if depth >= MAX_SPLIT_DEPTH || sentence.word_count() <= ctx.rules.sentence_max_words {
            return vec![sentence];
        }
        let tokens = sentence.into_tokens();
        let (head_end, tail_start) = Self::split_point(&tokens, ctx);
        let head = Sentence::new(tokens[..head_end].to_vec()).terminated();
        let tail = Sentence::new(tokens[tail_start..].to_vec());
        let tail = match cursor.pick(&ctx.vocabulary.split_transitions) {
            Some(transition) => tail.with_prefix(&format!("{transition},")),
            None => tail,
        };

        let mut out = self.split(head, ctx, cursor, depth + 1);
        out.extend(self.split(tail, ctx, cursor, depth + 1));
        out
    }
}

impl BodyPass for SentenceLengthPass {
    fn name(&self) -> &'static str {
        "sentence_length"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        let mut cursor = ctx.cursor(SPLIT_SALT);
        map_paragraphs(body, |sentences| {
            sentences
                .into_iter()
                .flat_map(|sentence| self.split(sentence, ctx, &mut cursor, 0))
                .collect()
        })
    }
}

/// Prefixes sentences with transition words until the configured share of
/// non-opening sentences carries one.
pub struct TransitionDensityPass;

impl BodyPass for TransitionDensityPass {
    fn name(&self) -> &'static str {
        "transition_density"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        let patterns = ctx.vocabulary.transition_patterns();
        let (mut with, eligible) = body.transition_stats(&patterns);
        if ctx.rules.transition_ratio_met(with, eligible) {
            return body;
        }

        let mut cursor = ctx.cursor(TRANSITION_SALT);
        map_paragraphs(body, |sentences| {
            sentences
                .into_iter()
                .enumerate()
                .map(|(index, sentence)| {
                    if index == 0
                        || ctx.rules.transition_ratio_met(with, eligible)
                        || has_transition(&sentence, &patterns)
                    {
                        return sentence;
                    }
                    match cursor.pick(&ctx.vocabulary.injected_transitions) {
                        Some(transition) => {
                            with += 1;
                            sentence.with_prefix(transition)
                        }
                        None => sentence,
                    }
                })
                .collect()
        })
    }
}

/// Breaks streaks of sentences that open with the same word.
pub struct RepeatedOpenerPass;

impl RepeatedOpenerPass {
    fn alternate(
        ctx: &PassContext<'_>,
        cursor: &mut VariantCursor,
        previous: Option<&str>,
        next: Option<&str>,
    ) -> Option<String> {
        let alternates = &ctx.vocabulary.opener_alternates;
        (0..alternates.len()).find_map(|_| {
            let candidate = cursor.pick(alternates)?;
            let opener = Sentence::parse(candidate).opener();
            let clashes = opener.as_deref() == previous || opener.as_deref() == next;
            (!clashes).then(|| candidate.clone())
        })
    }
}

impl BodyPass for RepeatedOpenerPass {
    fn name(&self) -> &'static str {
        "repeated_opener"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        let run_limit = ctx.rules.opener_run.max(2);
        if body.longest_opener_run() < run_limit {
            return body;
        }

        let mut cursor = ctx.cursor(OPENER_SALT);
        let mut blocks = body.into_blocks();
        let mut parsed: Vec<Option<Vec<Sentence>>> = blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(text) => Some(split_sentences(text)),
                _ => None,
            })
            .collect();

        // Runs of (block, sentence) positions across consecutive paragraphs.
        let mut runs: Vec<Vec<(usize, usize)>> = vec![Vec::new()];
        for (block_index, sentences) in parsed.iter().enumerate() {
            match sentences {
                Some(sentences) => {
                    if let Some(run) = runs.last_mut() {
                        run.extend((0..sentences.len()).map(|s| (block_index, s)));
                    }
                }
                None => runs.push(Vec::new()),
            }
        }

        let opener_at = |parsed: &[Option<Vec<Sentence>>], (b, s): (usize, usize)| {
            parsed[b].as_ref().and_then(|sentences| sentences[s].opener())
        };

        for run in runs.iter().filter(|run| run.len() >= run_limit) {
            for k in (run_limit - 1)..run.len() {
                let window: Vec<Option<String>> = run[k + 1 - run_limit..=k]
                    .iter()
                    .map(|&pos| opener_at(&parsed, pos))
                    .collect();
                let repeated = window[0].is_some() && window.iter().all(|o| *o == window[0]);
                if !repeated {
                    continue;
                }
                let previous = opener_at(&parsed, run[k - 1]);
                let next = run.get(k + 1).and_then(|&pos| opener_at(&parsed, pos));
                let Some(prefix) = Self::alternate(ctx, &mut cursor, previous.as_deref(), next.as_deref()) else {
                    continue;
                };
                let (b, s) = run[k];
                if let Some(sentences) = parsed[b].as_mut() {
                    let sentence = std::mem::replace(&mut sentences[s], Sentence::new(Vec::new()));
                    sentences[s] = sentence.with_prefix(&prefix);
                }
            }
        }

        for (block, sentences) in blocks.iter_mut().zip(parsed) {
            if let Some(sentences) = sentences {
                *block = Block::Paragraph(join_sentences(&sentences));
            }
        }
        Body::from_blocks(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Fixture, plain_sentences};
    use super::*;
    use crate::domain::article::text::phrase_words;

    fn long_sentence() -> &'static str {
        "A impressora imprime documentos com rapidez no escritório todos os dias e mantém a qualidade constante mesmo quando o volume de páginas aumenta bastante."
    }

    #[test]
    fn long_sentences_split_at_conjunction() {
        let fixture = Fixture::new("hp", "HP");
        let body = Body::parse(&format!("<p>{}</p>", long_sentence()));
        let body = SentenceLengthPass.apply(body, &fixture.ctx());

        let sentences = split_sentences(body.paragraphs().next().unwrap());
        assert_eq!(sentences.len(), 2);
        assert!(sentences.iter().all(|s| s.word_count() <= 20));
        assert_eq!(
            sentences[0].render(),
            "A impressora imprime documentos com rapidez no escritório todos os dias."
        );
        assert!(sentences[1].render().starts_with("Além disso, mantém a qualidade"));
    }

    #[test]
    fn very_long_sentences_split_repeatedly() {
        let fixture = Fixture::new("hp", "HP");
        let words: Vec<String> = (0..90).map(|i| format!("palavra{i}")).collect();
        let body = Body::parse(&format!("<p>{}.</p>", words.join(" ")));
        let body = SentenceLengthPass.apply(body, &fixture.ctx());
        let sentences = split_sentences(body.paragraphs().next().unwrap());
        assert!(sentences.len() >= 5);
        assert!(sentences.iter().all(|s| s.word_count() <= 20));
        for sentence in &sentences[1..] {
            assert!(sentence.render().contains(','), "{}", sentence.render());
        }
    }

    #[test]
    fn transitions_reach_target_ratio() {
        let fixture = Fixture::new("hp", "HP");
        let body = Body::parse(&format!("<p>{}</p><p>{}</p>", plain_sentences(6), plain_sentences(4)));
        let body = TransitionDensityPass.apply(body, &fixture.ctx());

        let patterns = fixture.vocabulary.transition_patterns();
        let (with, eligible) = body.transition_stats(&patterns);
        assert_eq!(eligible, 8);
        assert!(with as f64 >= 0.3 * eligible as f64, "{with}/{eligible}");
        assert_eq!(with, 3);
    }

    #[test]
    fn transition_pass_leaves_paragraph_openers_alone() {
        let fixture = Fixture::new("hp", "HP");
        let body = Body::parse(&format!("<p>{}</p>", plain_sentences(4)));
        let body = TransitionDensityPass.apply(body, &fixture.ctx());
        let first = split_sentences(body.paragraphs().next().unwrap()).remove(0);
        assert!(!has_transition(&first, &[phrase_words("além disso")]));
        assert_eq!(first.opener().as_deref(), Some("frase"));
    }

    #[test]
    fn opener_streaks_are_broken() {
        let fixture = Fixture::new("hp", "HP");
        let body = Body::parse(
            "<p>O modelo imprime. O modelo copia. O modelo digitaliza.</p><p>O modelo conecta. O modelo economiza.</p>",
        );
        let body = RepeatedOpenerPass.apply(body, &fixture.ctx());
        assert!(body.longest_opener_run() < 3, "{}", body.render());
        assert!(body.render().contains("Além disso, o modelo digitaliza."));
    }

    #[test]
    fn headings_reset_the_streak() {
        let fixture = Fixture::new("hp", "HP");
        let body = Body::parse("<p>O a. O b.</p><h2>x</h2><p>O c. O d.</p>");
        assert_eq!(RepeatedOpenerPass.apply(body.clone(), &fixture.ctx()), body);
    }
}
