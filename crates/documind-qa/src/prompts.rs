//! Fixed prompt templates for QA generation.

use rand::Rng;

/// Every template instructs the model to emit one JSON object with
/// `question`, `context`, and `answer` keys, citing the source.
pub(crate) const TEMPLATES: [&str; 3] = [
    r#"You are a machine learning expert. From the following context, produce:
1. One relevant question
2. A detailed answer that cites the source

Context: [{source}] {chunk}

Output format (JSON):
{
    "question": "your question here",
    "context": "[{source}] {chunk}",
    "answer": "your answer with citation. Source: {source}"
}

Now generate the Q&A pair:"#,
    r#"You are writing study material about machine learning datasets. Read the passage below and write one question a practitioner might ask, plus its answer. The answer must cite the source by name.

Passage: [{source}] {chunk}

Respond with a single JSON object:
{
    "question": "...",
    "context": "[{source}] {chunk}",
    "answer": "... Source: {source}"
}"#,
    r#"Generate one factual question-answer pair grounded strictly in the context. Do not invent facts that are not in the context, and end the answer with the citation.

Context: [{source}] {chunk}

Reply with JSON only:
{
    "question": "...",
    "context": "[{source}] {chunk}",
    "answer": "... Source: {source}"
}"#,
];

/// Pick one template at random.
pub(crate) fn random_template<R: Rng>(rng: &mut R) -> &'static str {
    TEMPLATES[rng.gen_range(0..TEMPLATES.len())]
}

/// Fill a template's `{source}` and `{chunk}` placeholders.
pub(crate) fn render(template: &str, source: &str, chunk: &str) -> String {
    template
        .replace("{source}", source)
        .replace("{chunk}", chunk)
}
