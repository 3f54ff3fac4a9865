use crate::language::Language;
use rand::seq::SliceRandom;
use rand::Rng;

/// Configuration for prompt generation
#[derive(Debug, Clone)]
pub struct WordGenConfig {
    pub number_of_words: usize,
    pub custom_prompt: Option<String>,
}

/// Supplies prompts for new and restarted sessions
#[derive(Debug, Clone)]
pub struct WordGenerator {
    config: WordGenConfig,
    language: Language,
}

impl WordGenerator {
    pub fn new(config: WordGenConfig, language: Language) -> Self {
        Self { config, language }
    }

    /// A custom prompt is returned verbatim every time; otherwise a fresh
    /// random prompt is drawn.
    pub fn generate_prompt(&self) -> String {
        if let Some(ref custom_prompt) = self.config.custom_prompt {
            return custom_prompt.clone();
        }
        generate_prompt(&self.language, self.config.number_of_words)
    }
}

/// `word_count` words drawn uniformly with replacement, joined by single spaces.
pub fn generate_prompt(language: &Language, word_count: usize) -> String {
    generate_prompt_with(&mut rand::thread_rng(), language, word_count)
}

pub fn generate_prompt_with<R: Rng + ?Sized>(
    rng: &mut R,
    language: &Language,
    word_count: usize,
) -> String {
    (0..word_count)
        .filter_map(|_| language.words.choose(&mut *rng))
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn english() -> Language {
        Language::new("english").unwrap()
    }

    fn create_test_config() -> WordGenConfig {
        WordGenConfig {
            number_of_words: 5,
            custom_prompt: None,
        }
    }

    #[test]
    fn prompt_has_requested_word_count() {
        let lang = english();
        for count in [1, 2, 5, 50] {
            let prompt = generate_prompt(&lang, count);
            assert_eq!(prompt.split(' ').count(), count);
        }
    }

    #[test]
    fn prompt_words_come_from_vocabulary() {
        let lang = english();
        let prompt = generate_prompt(&lang, 100);
        for word in prompt.split(' ') {
            assert!(lang.words.iter().any(|w| w == word), "{word} not in vocabulary");
        }
    }

    #[test]
    fn prompt_is_single_spaced_without_padding() {
        let prompt = generate_prompt(&english(), 20);
        assert!(!prompt.starts_with(' '));
        assert!(!prompt.ends_with(' '));
        assert!(!prompt.contains("  "));
        assert!(prompt.is_ascii());
    }

    #[test]
    fn draws_with_replacement() {
        let lang = Language::from_json(r#"{ "name": "one", "size": 1, "words": ["ok"] }"#).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate_prompt_with(&mut rng, &lang, 3), "ok ok ok");
    }

    #[test]
    fn test_custom_prompt() {
        let mut config = create_test_config();
        config.custom_prompt = Some("custom test prompt".to_string());

        let generator = WordGenerator::new(config, english());
        assert_eq!(generator.generate_prompt(), "custom test prompt");
        assert_eq!(generator.generate_prompt(), "custom test prompt");
    }

    #[test]
    fn test_word_generation_random() {
        let generator = WordGenerator::new(create_test_config(), english());
        let prompt = generator.generate_prompt();

        assert!(!prompt.is_empty());
        assert_eq!(prompt.split(' ').count(), 5);
    }
}
