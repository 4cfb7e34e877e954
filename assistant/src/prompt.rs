//! Prompt construction for grounded answers.

use nuit_retrieval::KnowledgeEntry;

use crate::models::Language;

const NO_CONTEXT: &str = "Aucun contexte FAQ fiable.";

const INSTRUCTIONS: &str = "Tu es un assistant IA low-cost pour la Nuit de l'Info 2025 et les \
services publics numériques. Tu dois répondre de manière courte, claire et pédagogique, dans la \
langue indiquée. Utilise uniquement les informations ci-dessous comme source principale. Si \
l'information ne s'y trouve pas, répond honnêtement que tu n'es pas sûr(e) et propose une réponse \
prudente. Répond toujours avec tes propres mots, en reformulant le contexte sans copier mot pour \
mot les phrases données. Tu peux ajouter une courte phrase d'explication pour aider \
l'utilisateur, mais reste concis.";

/// Numbered `[FAQ n]` block. Arabic text is used for `ar` when present.
pub fn build_context_block(language: Language, entries: &[KnowledgeEntry]) -> String {
    if entries.is_empty() {
        return NO_CONTEXT.to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let (question, answer) = match language {
                Language::Ar => (
                    entry.question_ar().unwrap_or(&entry.question_fr),
                    entry.answer_ar().unwrap_or(&entry.answer_fr),
                ),
                Language::Fr => (entry.question_fr.as_str(), entry.answer_fr.as_str()),
            };
            format!("[FAQ {}] Q: {}\nR: {}", idx + 1, question, answer)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Full prompt sent as the single user message
pub fn build_prompt(query: &str, language: Language, entries: &[KnowledgeEntry]) -> String {
    let answer_label = match language {
        Language::Fr => "Réponse:",
        Language::Ar => "الإجابة:",
    };

    format!(
        "{INSTRUCTIONS}\n\n\
         Langue de réponse: {}.\n\n\
         Contexte FAQ:\n{}\n\n\
         Question utilisateur: {}\n\n\
         {answer_label}",
        language.label(),
        build_context_block(language, entries),
        query,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<KnowledgeEntry> {
        vec![
            KnowledgeEntry::new(1, "Quand ?", "Les 4 et 5 décembre.").with_arabic("متى؟", "في ديسمبر."),
            KnowledgeEntry::new(2, "Où ?", "Partout en France."),
        ]
    }

    #[test]
    fn test_context_block_french() {
        let block = build_context_block(Language::Fr, &entries());
        assert_eq!(
            block,
            "[FAQ 1] Q: Quand ?\nR: Les 4 et 5 décembre.\n\n[FAQ 2] Q: Où ?\nR: Partout en France."
        );
    }

    #[test]
    fn test_context_block_arabic_falls_back_to_french() {
        let block = build_context_block(Language::Ar, &entries());
        assert!(block.contains("[FAQ 1] Q: متى؟\nR: في ديسمبر."));
        assert!(block.contains("[FAQ 2] Q: Où ?\nR: Partout en France."));
    }

    #[test]
    fn test_context_block_without_entries() {
        assert_eq!(build_context_block(Language::Fr, &[]), NO_CONTEXT);
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt("C'est quand ?", Language::Fr, &entries());
        assert!(prompt.starts_with("Tu es un assistant IA low-cost"));
        assert!(prompt.contains("Langue de réponse: français."));
        assert!(prompt.contains("Contexte FAQ:\n[FAQ 1]"));
        assert!(prompt.contains("Question utilisateur: C'est quand ?"));
        assert!(prompt.ends_with("Réponse:"));
    }

    #[test]
    fn test_prompt_arabic_label() {
        let prompt = build_prompt("متى؟", Language::Ar, &[]);
        assert!(prompt.contains("Langue de réponse: arabe."));
        assert!(prompt.contains(NO_CONTEXT));
        assert!(prompt.ends_with("الإجابة:"));
    }
}
