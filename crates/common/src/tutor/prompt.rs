//! Socratic tutoring prompt

use super::history::ConversationHistory;
use super::{ChatMessage, Role};

/// Fixed tutoring policy sent as the system message
pub const SYSTEM_PROMPT: &str = "\
You are a highly effective AI teaching assistant that uses the Socratic method to guide students toward understanding concepts in Data Structures and Algorithms (DSA).
Your role is to ask thoughtful, probing questions that lead the student to figure out the solution on their own.

If the student's answer seems almost correct or they are very desperate for the solution, then you should provide the correct answer without asking further questions.

The focus of the current topic is **Data Structures and Algorithms (DSA)**, guiding the student to:
1. Understand data structures such as arrays, linked lists, stacks, queues, trees, heaps, graphs, and algorithms like sorting, searching, dynamic programming, and graph traversal.
2. Identify weaknesses in their code, including implementation errors, time complexity, and space complexity.
3. Optimize and debug their solutions while ensuring correctness and efficiency.

Encourage students by using phrases like \"Well done! 👍\" or \"You're very close! Keep going!\".
";

pub const STUDENT_LABEL: &str = "Student";
pub const ASSISTANT_LABEL: &str = "Socratic Assistant";

const CLOSING_INSTRUCTION: &str =
    "Respond to the student's query by asking a probing question that leads them to the solution.";

/// Render prior turns as labelled lines, oldest first
pub fn format_history(history: &ConversationHistory) -> String {
    history
        .turns()
        .iter()
        .map(|turn| {
            format!(
                "{}: {}\n{}: {}",
                STUDENT_LABEL, turn.student, ASSISTANT_LABEL, turn.assistant
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human turn embedding the rendered history and the new query
pub fn build_human_prompt(student_query: &str, history: &ConversationHistory) -> String {
    format!(
        "{}\n\n{}: {}\n\n{}",
        format_history(history),
        STUDENT_LABEL,
        student_query,
        CLOSING_INSTRUCTION
    )
}

/// System policy followed by the human turn
pub fn build_messages(student_query: &str, history: &ConversationHistory) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(Role::System, SYSTEM_PROMPT),
        ChatMessage::new(Role::User, build_human_prompt(student_query, history)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::ConversationTurn;

    #[test]
    fn test_format_history_alternates_labels() {
        let history: ConversationHistory = vec![
            ConversationTurn::new("What is a stack?", "What order do plates come off a pile?"),
            ConversationTurn::new("Last in, first out", "Well done! 👍"),
        ]
        .into();

        assert_eq!(
            format_history(&history),
            "Student: What is a stack?\n\
             Socratic Assistant: What order do plates come off a pile?\n\
             Student: Last in, first out\n\
             Socratic Assistant: Well done! 👍"
        );
    }

    #[test]
    fn test_empty_history_renders_nothing() {
        assert_eq!(format_history(&ConversationHistory::new()), "");
        let human = build_human_prompt("What is a heap?", &ConversationHistory::new());
        assert!(human.starts_with("\n\nStudent: What is a heap?"));
    }

    #[test]
    fn test_human_prompt_keeps_prior_turn_before_query() {
        let history: ConversationHistory =
            vec![ConversationTurn::new("What is a stack?", "...")].into();
        let human = build_human_prompt("Why use it for undo operations?", &history);

        let prior = human.find("Student: What is a stack?").unwrap();
        let query = human.find("Student: Why use it for undo operations?").unwrap();
        assert!(prior < query);
        assert!(human.ends_with(CLOSING_INSTRUCTION));
    }

    #[test]
    fn test_messages_are_system_then_user() {
        let messages = build_messages("Explain BFS", &ConversationHistory::new());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("Explain BFS"));
    }
}
