//! Fixed copy shown to participants. Everything here is HTML for
//! Telegram's `ParseMode::Html`.

pub(crate) const TITLE: &str = "✨ Prompty+";

pub(crate) const CONSENT: &str = "<b>Welcome to the Prompt Engineering Study</b>

This activity explores how students can learn to communicate better with AI tools like ChatGPT. Your participation will help us understand effective teaching strategies for AI literacy.

<b>What to Expect</b>
• Complete a brief pre-survey about your AI experience
• Review a short educational module (5 minutes)
• Write a brief explanation on an unfamiliar topic
• Complete a post-survey about your experience
• Total time: approximately 45-60 minutes

<b>Your Privacy</b>
Your responses are completely anonymous. You may exit the study at any time with /cancel.";

pub(crate) const CONSENT_CHECKBOX: &str =
    "I am at least 14 years old and consent to anonymous participation in this research study.";

pub(crate) const PRE_SURVEY_INTRO: &str = "Please rate your agreement with each statement using the scale below (1 = Strongly Disagree, 5 = Strongly Agree).";

pub(crate) const POST_SURVEY_INTRO: &str = "Please rate your agreement with each statement about your AI use in this activity (1 = Strongly Disagree, 5 = Strongly Agree).";

pub(crate) const LIKERT_HINT: &str = "Each row of buttons belongs to the statement with the same number.";

pub(crate) const PRE_STATEMENTS: [&str; 5] = [
    "I understand how to write clear and specific prompts for AI tools.",
    "When I use AI, I usually ask for final answers instead of explanations.",
    "I use AI to help me think through problems step-by-step.",
    "I know how to tell if AI responses are accurate or biased.",
    "I think AI can help me learn more effectively if used responsibly.",
];

pub(crate) const PRE_OPEN: [&str; 3] = [
    "How do you usually use AI tools in your schoolwork?",
    "What makes a \"good\" AI prompt?",
    "What concerns do you have about using AI in school?",
];

pub(crate) const POST_STATEMENTS: [&str; 5] = [
    "I feel more confident writing effective AI prompts.",
    "I now ask AI for explanations or reasoning rather than just answers.",
    "The activity helped me understand how to learn with AI more effectively.",
    "I now think more critically about AI responses.",
    "I understand how to use AI ethically for schoolwork.",
];

pub(crate) const POST_OPEN: [&str; 3] = [
    "Describe one example of how you changed your prompting after this activity.",
    "How did this lesson change the way you approach learning or writing?",
    "Do you think all students should learn prompt engineering? Why or why not?",
];

pub(crate) const TOPICS: [&str; 3] = [
    "Why do neutron stars 'glitch'?",
    "How do slime molds solve mazes?",
    "What is the Monty Hall paradox and why is it counterintuitive?",
];

pub(crate) const TREATMENT_TITLE: &str = "Prompt Engineering Mini-Course";

pub(crate) const TREATMENT_MODULE: &str = "Welcome! This module introduces prompt engineering: the art and science of crafting effective prompts to get better results from AI tools.

<b>📐 The Role-Context-Task Framework</b>
Effective prompts are structured using three key components:
• <b>Role</b> (Who is the AI?): define the persona or expertise the AI should adopt. <code>You are a journalist.</code>
• <b>Context</b> (What's the situation?): provide background information or the setting. <code>There is a mental health crisis in the country.</code>
• <b>Task</b> (What to do?): clearly state what you want the AI to produce. <code>Write an article for awareness.</code>

<b>🔄 Contrasting Cases: Learning by Comparison</b>
When you use AI, it can generate multiple different responses. Each version may emphasize different aspects, use different vocabulary, or approach the topic from a different angle. Comparing multiple responses helps you understand what makes a response effective: tone, clarity, completeness and appropriateness.

<b>⚡ Mindful AI Usage: Environmental Impact</b>
AI technologies require significant energy and computational resources.
• Training large AI models consumes substantial electricity
• Each AI generation has an environmental cost
• Being intentional reduces waste and teaches responsibility
That's why we encourage you to <b>pause and reflect</b> between generations and use AI as a learning tool rather than a quick-answer generator.

<b>🎯 Best Practices</b>
❌ Avoid: \"Tell me about photosynthesis\" (too vague, unclear purpose)
✅ Good: \"Explain photosynthesis to a 9th grader using analogies and step-by-step how plants convert sunlight into energy\" (clear role, context and task)

<b>🧠 Remember: You're in Control</b>
AI is a tool, powerful but not perfect. Your role is to <b>think critically</b> about responses, <b>verify information</b> when needed, and use AI to enhance your learning rather than replace it.";

pub(crate) const PRACTICE_INVITE: &str = "💡 Want to try it out? Open the interactive practice, or continue to the writing task to apply these principles.";

pub(crate) const PRACTICE_NOTE: &str =
    "AI technologies require significant energy. Be mindful and intentional with each generation.";

pub(crate) const PRACTICE_EXHAUSTED: &str = "You've used all your tries. This limitation encourages intentional usage and reflection. Ready to apply what you've learned to the writing task?";

pub(crate) const CONTROL_TITLE: &str = "Digital Literacy Module";

pub(crate) const CONTROL_MODULE: &str = "This brief lesson focuses on digital literacy: evaluating the credibility of online sources and avoiding plagiarism.

<b>Key Principles</b>
• <b>Check sources</b>: Always verify information with trusted references.
• <b>Avoid copy/paste</b>: Use your own words and cite when using external ideas.
• <b>Be critical</b>: Ask who authored the information and for what purpose.

<b>Example</b>
When evaluating online information, check multiple sources, look for author credentials, and consider the publication date.";

pub(crate) const TASK_INTRO: &str = "Select a topic below and write a 200–250 word explanation for a 9th-grade student. You may use AI, but you must disclose how you used it.";

pub(crate) const COMPLETE: &str = "<b>✓ Thank You!</b>
Your responses have been recorded anonymously.";

pub(crate) const LOTTERY: &str = "<b>🎉 Optional: Enter our GPT-5 Lottery</b>
As a thank you for participating, we're offering a chance to win early access to GPT-5! This is completely optional, and your study participation is valid regardless of your choice.";

pub(crate) const LOTTERY_NOTE: &str = "This allows us to contact you if you win. This number will be kept separately from your study responses.";

pub(crate) const COMPLETE_FOOTER: &str = "Send /mydata for a copy of your answers. Your participation helps advance educational research on AI literacy. Thank you!";
