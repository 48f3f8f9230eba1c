// Abacus Commands — FAQ
//
// Static help entries for the FAQ page. Content-only; the page renders
// them as a list.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

const ENTRIES: &[FaqEntry] = &[
    FaqEntry {
        question: "How do I chat with the bot?",
        answer: "Go to the Chat page and start typing your message.",
    },
    FaqEntry {
        question: "How do I upload an invoice?",
        answer: "Use the Invoice Upload page to select and send your PDF.",
    },
    FaqEntry {
        question: "What is predictive accounting?",
        answer: "Fill out the form on the Predictive Accounting page to get predictions.",
    },
];

#[tauri::command]
pub fn faq_entries() -> Vec<FaqEntry> {
    ENTRIES.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_complete() {
        let entries = faq_entries();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| !e.question.is_empty() && !e.answer.is_empty()));
    }
}
