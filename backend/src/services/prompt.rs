//! Instruction template for reframe generation.

use serde_json::Value;

use crate::api::DistortionMap;

/// Build the reframe prompt for a journal entry and its distortion map.
///
/// The map is embedded as 2-space indented JSON. The template asks for a
/// JSON object keyed by distortion name with `reframe` and `question`
/// strings and nothing outside it.
pub fn build_reframe_prompt(entry: &str, distortion_map: &DistortionMap) -> String {
    let map_dump = format!("{:#}", Value::Object(distortion_map.clone()));

    format!(
        r#"You are a compassionate and practical CBT therapist.

Help the user reframe their negative thoughts using their own journal entry and the cognitive distortions a classifier found in it.

---

USER'S JOURNAL ENTRY:

"""{entry}"""

---

DETECTED DISTORTIONS AND TRIGGER SENTENCES:

{map_dump}

---

TASK:

For each distortion above:

1. Reframe: write a short (1-2 sentence) personalized cognitive reframe.
   Make it directly relevant to the user's journal text and emotions.
   Avoid generic or robotic advice. Be warm, supportive and emotionally attuned.

2. Question: give one CBT-style thought-challenging question the user can ask themselves.

STYLE REQUIREMENTS:
- No "Let's..." phrases
- No therapist-speak such as "clients often feel..."
- No disclaimers, preambles or definitions of distortions
- No conversational filler such as "I'm here to help you..."
- Output ONLY valid JSON in exactly this format:

{{
  "Distortion Type 1": {{
    "reframe": "Personalized reframe for this distortion...",
    "question": "Thought-challenging question..."
  }},
  "Distortion Type 2": {{
    "reframe": "Personalized reframe...",
    "question": "Thought-challenging question..."
  }}
}}

Do not add explanations, preambles or comments outside the JSON.

The reframes should read like something a CBT therapist would write on a worksheet for this specific journal entry.
"#
    )
}
