// Prompt templates sent to the text service.

pub fn summarize(text: &str) -> String {
    format!("Summarize the following legal text clearly and concisely:\n\n{text}")
}

pub fn merge_summaries(partials: &[String]) -> String {
    format!(
        "Combine the following {} partial summaries into one clear, concise summary:\n\n{}",
        partials.len(),
        partials.join("\n\n")
    )
}

pub fn translate(text: &str, target_language: &str) -> String {
    format!(
        "Translate the following legal text into {target_language}. \
         Preserve meaning, accuracy, and tone. Return only the translation:\n\n{text}"
    )
}

pub fn ask(text: &str, question: &str) -> String {
    format!(
        "Answer the following question based strictly on the legal text below.\n\
         Return ONLY plain text (no JSON needed).\n\n\
         Text:\n{text}\n\nQuestion: {question}"
    )
}

pub fn compare(first: &str, second: &str) -> String {
    format!(
        "Compare these two legal documents and highlight key differences and similarities.\n\
         Return plain text (bullet points are fine).\n\n\
         Document 1:\n{first}\n\nDocument 2:\n{second}"
    )
}

pub fn key_terms(text: &str) -> String {
    format!(
        r#"Extract and define the key legal terms from the following text.
Return ONLY valid JSON in this format:

[
  {{ "term": "Party A", "definition": "The buyer company" }},
  {{ "term": "Indemnity", "definition": "Obligation to compensate for damages" }}
]

Text:
{text}"#
    )
}

pub fn legal_issues(text: &str) -> String {
    format!(
        r#"Identify potential legal issues in the document.
Return ONLY valid JSON in this format:

[
  {{ "issue": "Ambiguous termination clause", "explanation": "Termination conditions are vague" }},
  {{ "issue": "Missing dispute resolution clause", "explanation": "No mechanism for arbitration or litigation" }}
]

Text:
{text}"#
    )
}

pub fn contract_clauses(text: &str) -> String {
    format!(
        r#"Analyze the contract clauses in this document.
For each clause, return ONLY valid JSON in this format:

[
  {{
    "clause": "Termination",
    "purpose": "Specifies conditions under which the contract may end",
    "risk": "Ambiguous language may favor one party",
    "suggestion": "Clarify notice period and mutual rights"
  }}
]

Text:
{text}"#
    )
}

pub fn comprehensive_analysis(text: &str) -> String {
    format!(
        r#"Perform a comprehensive legal analysis of this document.
Return ONLY valid JSON in this format:

{{
  "documentType": "Employment Agreement",
  "parties": ["Employer", "Employee"],
  "obligations": "Employer provides salary, Employee provides services",
  "deadlines": "30 days' notice for termination",
  "risks": ["Ambiguous non-compete clause"],
  "recommendations": ["Clarify scope of non-compete"],
  "overallAssessment": "Generally balanced but with some ambiguities"
}}

Text:
{text}"#
    )
}

pub fn document_analysis(text: &str) -> String {
    format!(
        r#"You are a legal assistant. Analyze the following document text and return a structured JSON with:
- summary (5-10 bullet points),
- important clauses (with clause name and short explanation),
- potential risks (if any),
- obligations (what parties must do),
- missing elements (if relevant).

Document:
"""
{text}
"""

Return valid JSON only in this format:
{{
  "summary": [],
  "clauses": [],
  "risks": [],
  "obligations": [],
  "missing_elements": []
}}"#
    )
}
