//! Prompt templates and placeholder substitution
//!
//! Templates are constant instruction payloads with `{{...}}` slots. The
//! document (or the concatenated map outputs) is spliced into its slot at
//! call time; everything else in the payload is fixed.

/// Slot for the document body in map templates
pub const TRANSCRIPT_TEXT_SLOT: &str = "{{TRANSCRIPT_TEXT}}";

/// Slot for the document filename in map templates
pub const TRANSCRIPT_FILENAME_SLOT: &str = "{{TRANSCRIPT_FILENAME}}";

/// Slot for the concatenated map outputs in reduce templates
pub const CONCATENATED_EXTRACTS_SLOT: &str = "{{CONCATENATED_EXTRACTS}}";

/// Fill a map template's slots with the document body and filename
pub fn render_map_prompt(template: &str, text: &str, source_name: &str) -> String {
    template
        .replace(TRANSCRIPT_FILENAME_SLOT, source_name)
        .replace(TRANSCRIPT_TEXT_SLOT, text)
}

/// Fill a reduce template's slot with the concatenated map outputs
pub fn render_reduce_prompt(template: &str, concatenated: &str) -> String {
    template.replace(CONCATENATED_EXTRACTS_SLOT, concatenated)
}

/// Map prompt for meeting transcripts, newsletter extraction
pub const NEWSLETTER_MEETING_MAP_TEMPLATE: &str = r#"You are an expert meeting analyst extracting key information from meeting transcripts for a weekly newsletter. Focus on information valuable to team members who were not present. Be concise but comprehensive.

Extract newsletter-worthy content from the following meeting transcript.

Meeting: {{TRANSCRIPT_FILENAME}}

<transcript>
{{TRANSCRIPT_TEXT}}
</transcript>

Extract the following sections (use "None identified" if a section has no relevant content):

## Key Decisions & Outcomes
## Project Updates
## Technical Discussions
## Challenges & Blockers
## Action Items
## Notable Moments

Focus on concrete, actionable information."#;

/// Map prompt for Telegram exports, newsletter extraction
pub const NEWSLETTER_TELEGRAM_MAP_TEMPLATE: &str = r#"You are an expert analyst extracting key information from Telegram chat discussions for a weekly newsletter. Focus on substantive discussions rather than casual chat.

Extract newsletter-worthy content from the following Telegram chat transcript.

Source: {{TRANSCRIPT_FILENAME}}

<transcript>
{{TRANSCRIPT_TEXT}}
</transcript>

Extract the following sections (use "None identified" if a section has no relevant content):

## Announcements & Updates
## Technical Discussions
## Resources Shared
## Questions & Answers
## Community Highlights

Focus on substantive content that would be valuable for the weekly newsletter."#;

/// Reduce prompt synthesizing the final newsletter
pub const NEWSLETTER_REDUCE_TEMPLATE: &str = r#"You are an expert newsletter editor synthesizing extracted content from multiple sources into a cohesive weekly newsletter. Organize by importance, keep it scannable, and aim for a 5-10 minute read.

Synthesize the following extracted content into a comprehensive weekly newsletter.

<extracted_content>
{{CONCATENATED_EXTRACTS}}
</extracted_content>

Create a newsletter with these sections:

# Weekly Team Newsletter

## The Week's Highlights
## Progress & Momentum
## Interesting Discussions
## Heads Up
## The Human Side
## Resources to Check Out

Keep each section concise but informative. Use bullet points for easy scanning."#;

/// Map prompt identifying people, person-profiles extraction
///
/// The closing instruction pins the exact sentinel the map phase checks
/// for, so "nothing found" responses are never persisted as artifacts. A
/// test below keeps it in sync with the domain constant.
pub const PERSON_PROFILES_MAP_TEMPLATE: &str = r###"You are an analyst building a picture of the people involved in a project from its meeting transcripts and chat logs.

Transcript: {{TRANSCRIPT_FILENAME}}

<transcript>
{{TRANSCRIPT_TEXT}}
</transcript>

For each person who appears, record: the name as observed (and variants), their apparent role, the topics they discussed, and notable statements or commitments, as markdown with one "## <name>" section per person.

If no identifiable people appear, reply with exactly:
No key persons identified in this transcript."###;

/// Reduce prompt synthesizing consolidated person profiles
pub const PERSON_PROFILES_REDUCE_TEMPLATE: &str = r#"You are an analyst consolidating per-transcript person notes into one profile per person.

<extracted_content>
{{CONCATENATED_EXTRACTS}}
</extracted_content>

Merge name variants that refer to the same person. Return ONLY a JSON array, no markdown code blocks, no explanations, where each element has this shape:

{
  "metadata": {
    "name": "canonical name",
    "aliases": ["variant", ...],
    "role": "inferred role",
    "mentioned_in_sources": ["filename", ...],
    "topics": ["topic", ...]
  },
  "content": "full markdown profile body"
}"#;
