use crate::domain::model::{Command, Note};

const SUMMARIZE_SYSTEM: &str = "You are an expert content summarizer. Your task is to:
1. Create a concise summary of the provided content
2. Keep the summary to 120 words or less
3. Maintain the key information and context
4. Write in clear, professional language
5. Return only the summary text, no additional formatting";

const ENLARGE_SYSTEM: &str = "You are an expert content expander. Your task is to:
1. Start your response with the exact first sentence from the original content (do not modify it)
2. Expand the content to 800-1000 words
3. Include at least one ordered list (1. 2. 3.) or unordered list (- or *)
4. Add relevant details, examples, and explanations
5. Maintain the original topic and context
6. Write in an engaging, informative style
7. Return only the expanded content, no additional formatting";

const FORMAT_SYSTEM: &str = "You are an expert content formatter. Your task is to:
1. Take unformatted, poorly structured text and make it well-formatted
2. Organize content into clear paragraphs with proper sentence structure
3. Fix grammar, spelling, and punctuation errors
4. Improve readability while preserving the original meaning
5. Add appropriate structure with headings if needed
6. Include bullet points or numbered lists where appropriate to organize information
7. Ensure proper capitalization and spacing
8. Return only the formatted content, no additional commentary";

const PROFILE_INSIGHT_SYSTEM: &str = "You are an expert data analyst specializing in personal productivity and behavior patterns. Your task is to analyze user notes and provide insights in a specific format.

Analyze the provided notes and give output in this EXACT format:
- Interests:
- Most Active Time:
- Recent Focus:
- Average Sentiment:
- Weekly Summary:
- Suggested Topics:

Guidelines:
1. Interests: List 3-5 main topics/themes based on tags and content
2. Most Active Time: Determine peak activity hours from timestamps
3. Recent Focus: Identify what the user has been concentrating on lately
4. Average Sentiment: Assess overall mood (positive/neutral/negative) with brief explanation
5. Weekly Summary: Provide a 2-3 sentence overview of the week's activities
6. Suggested Topics: Recommend 3-4 topics they might want to explore based on their patterns

Be concise, insightful, and specific. Use the exact format with dashes and colons.";

/// The six report fields the profile insight prompt asks for, in order.
pub const PROFILE_INSIGHT_FIELDS: [&str; 6] = [
    "Interests",
    "Most Active Time",
    "Recent Focus",
    "Average Sentiment",
    "Weekly Summary",
    "Suggested Topics",
];

pub fn system_prompt(command: Command) -> &'static str {
    match command {
        Command::Summarize => SUMMARIZE_SYSTEM,
        Command::Enlarge => ENLARGE_SYSTEM,
        Command::Format => FORMAT_SYSTEM,
        Command::ProfileInsight => PROFILE_INSIGHT_SYSTEM,
    }
}

/// User instruction for the single-note commands.
pub fn note_prompt(command: Command, note: &Note) -> String {
    let request = match command {
        Command::Summarize => "Please provide a concise summary of this content.",
        Command::Enlarge => {
            "Please expand this content to 800-1000 words, starting with the exact first sentence unchanged."
        }
        Command::Format => {
            "Please format this content properly. Fix any grammar, spelling, punctuation issues and organize it into a well-structured, readable format."
        }
        Command::ProfileInsight => return profile_prompt(std::slice::from_ref(note)),
    };

    format!(
        "Content: {}\nTags: {}\n\n{}",
        note.content,
        note.joined_tags(),
        request
    )
}

pub fn profile_prompt(notes: &[Note]) -> String {
    let mut text = String::from("Here are the notes:\n\n");
    for note in notes {
        text.push_str(&format!(
            "Title: {}\nTags: {}\nContent: {}\nCreated: {}\n\n",
            note.title.as_deref().unwrap_or("Untitled"),
            note.joined_tags(),
            note.content,
            note.created_at.to_rfc3339()
        ));
    }
    text.push_str("\nPlease analyze these notes and provide profile insights in the specified format.");
    text
}
