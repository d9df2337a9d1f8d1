//! Prompt text sent to the model for each section.

/// System instruction for research chat
pub const RESEARCH_SYSTEM: &str = "You are Skoolify AI, an expert academic researcher. \
Give detailed, accurate and educational answers, and cite the sources the search tool provides.";

/// System instruction for lesson notes
pub const NOTES_SYSTEM: &str =
    "You are an experienced teacher who writes lesson notes that are easy to follow.";

/// System instruction for study plans
pub const STUDY_SYSTEM: &str = "You are a personal study coach.";

/// Grounded search for video tutorials
pub fn video_search(topic: &str, class_name: &str, instructions: &str) -> String {
    format!(
        "Find 5 distinct YouTube video tutorials on \"{}\" for class/grade \"{}\". {}. \
         Only return video links that actually appear in the search results.",
        topic, class_name, instructions
    )
}

/// Turn search context into a strict JSON list of videos
pub fn video_extraction(context: &str) -> String {
    format!(
        "Context:\n{}\n\n\
         Task: return a JSON list of the 3-5 best educational videos in the context above.\n\
         Rules:\n\
         1. Use ONLY URLs that appear in the context. Never invent a URL.\n\
         2. Every link must be a video URL (prefer YouTube).\n\
         3. Give each video a title, a short description and the channel name when known.\n\
         4. Output strict JSON: [{{ \"title\": \"...\", \"url\": \"...\", \"description\": \"...\", \"channel\": \"...\" }}]",
        context
    )
}

/// Lesson note request
pub fn lesson_notes(topic: &str, class_name: &str, instructions: &str) -> String {
    format!(
        "Write a complete lesson note on \"{}\".\n\
         Audience: class/grade {}.\n\
         Extra instructions: {}.\n\n\
         Use Markdown with these sections:\n\
         1. Topic Overview\n\
         2. Key Objectives\n\
         3. Detailed Content (bullet points, key terms in bold)\n\
         4. Summary\n\
         5. Review Questions",
        topic, class_name, instructions
    )
}

/// Study plan request
pub fn study_plan(topic: &str, class_name: &str, instructions: &str) -> String {
    format!(
        "Write a complete study guide for \"{}\" (grade {}).\n\
         {}\n\n\
         Include:\n\
         1. An in-depth study text in Markdown.\n\
         2. Mnemonics or other memory aids.\n\
         3. Real-world applications.\n\
         4. A study schedule tailored to this topic.",
        topic, class_name, instructions
    )
}

/// Quiz request (the response schema is sent separately)
pub fn quiz(topic: &str, class_name: &str, level: &str, instructions: &str) -> String {
    format!(
        "Generate a multiple-choice quiz. Topic: \"{}\". Class: \"{}\". Difficulty: \"{}\".\n\
         {}\n\n\
         Every question needs an \"explanation\" field written simply enough for a student: \
         say why the correct answer is right and what concept it teaches. \
         \"correctAnswer\" must be the exact text of one of the options.",
        topic, class_name, level, instructions
    )
}
