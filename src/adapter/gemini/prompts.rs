//! Gemini Prompts and Payloads
//!
//! システムプロンプトと generateContent リクエストボディの組み立て

use serde_json::{json, Value};

use crate::domain::entities::capture::{TechniqueCapture, KEYFRAME_MIME_TYPE};
use crate::domain::entities::skill::SkillCategory;

/// チャットコーチのシステムプロンプト
pub const COACH_SYSTEM_PROMPT: &str = "\
You are \"Coach AI\", a football coach and tactician with an encouraging, clear and professional voice.
Help coaches, players and fans understand the game with safe, practical, well-explained advice.
RULES:
1. Never give medical advice. For any injury question, tell the user to see a qualified medical professional and nothing else.
2. Be concrete. Recommend a specific drill instead of generic advice such as \"practice passing\".
3. Structure answers with headings, bullet points or numbered lists.
4. Stay under 150 words so the answer reads well on a phone.";

const STRIKE_FRAMES: &str = "\
You will receive 5 sequential keyframe images.
- Image 1: \"Approach\" (just before contact)
- Image 2: \"Contact\" (the ball strike)
- Image 3: \"Follow-through (Start)\" (just after contact)
- Image 4: \"Follow-through (End)\" (end of the motion)
- Image 5: \"Ball Trajectory\" (the ball's flight)";

const DEFENDING_FRAMES: &str = "\
You will receive 4 sequential keyframe images.
- Image 1: \"Approach\" (closing down the attacker)
- Image 2: \"Jockey/Stance\" (body position and balance)
- Image 3: \"Action\" (tackle, interception or block)
- Image 4: \"Recovery\" (regaining balance or possession)";

const POSITIONING_FRAMES: &str = "\
You will receive 4 sequential keyframe images.
- Image 1: \"Initial Position\" (where the player starts as play begins)
- Image 2: \"Scan/Movement\" (scanning or moving into space)
- Image 3: \"Action Phase\" (position when the ball is played or received)
- Image 4: \"Recovery/Transition\" (where the player moves next)";

const PASSING_INSTRUCTION: &str = "\
SPECIAL INSTRUCTION FOR PASSING: Judge the weight of the pass from the player's body shape. \
The 'issues' array must state whether the pass looks too hard or too soft.";

const DEFENDING_INSTRUCTION: &str = "\
SPECIAL INSTRUCTION FOR DEFENDING: Focus on body shape, balance and timing. \
Is the player on their toes, angled correctly, or over-committing?";

const POSITIONING_INSTRUCTION: &str = "\
SPECIAL INSTRUCTION FOR POSITIONING: Focus on awareness. \
Is the player scanning, finding space to receive or defend, or ball-watching?";

const RESPONSE_RULES: &str = "\
RESPONSE RULES:
1. Output only the JSON object, with no markdown fences and no text before or after it.
2. Report at least one item in 'issues', even a minor one.
3. List only one or two clear, significant strengths.
4. Every string (issue, fix, strength, drill) must contain meaningful text, never empty or whitespace.";

fn frame_descriptions(category: SkillCategory) -> &'static str {
    match category {
        SkillCategory::Shooting | SkillCategory::Passing => STRIKE_FRAMES,
        SkillCategory::Defending => DEFENDING_FRAMES,
        SkillCategory::Positioning => POSITIONING_FRAMES,
    }
}

/// カテゴリとサブスキル名に応じた追加指示
///
/// シュート/パス系はサブスキル名に pass, cross, ball を含む場合のみパス強度の指示を付ける
fn skill_instruction(category: SkillCategory, skill_name: &str) -> Option<&'static str> {
    match category {
        SkillCategory::Shooting | SkillCategory::Passing => {
            let lower = skill_name.to_lowercase();
            ["pass", "cross", "ball"]
                .iter()
                .any(|word| lower.contains(word))
                .then_some(PASSING_INSTRUCTION)
        }
        SkillCategory::Defending => Some(DEFENDING_INSTRUCTION),
        SkillCategory::Positioning => Some(POSITIONING_INSTRUCTION),
    }
}

/// テクニック分析のシステムプロンプトを組み立てる
///
/// # Arguments
///
/// * `category` - スキルカテゴリ（キーフレームの説明を決める）
/// * `skill_name` - サブスキルの表示名。空なら "selected skill"
pub fn analysis_system_prompt(category: SkillCategory, skill_name: &str) -> String {
    let skill_name = match skill_name.trim() {
        "" => "selected skill",
        name => name,
    };
    let schema = serde_json::to_string_pretty(&analysis_response_schema()).unwrap_or_default();

    let mut prompt = format!(
        "You are a harsh, world-class football analyst. Score strictly: 50-60 is an average amateur, \
70-80 a top amateur, 90+ a world-class professional. Do not hand out high scores; find the flaws.\n\n\
You are analyzing a \"{skill_name}\".\n{frames}\n\n\
Analyze the whole motion across every image and give one consolidated report.\n\n",
        skill_name = skill_name,
        frames = frame_descriptions(category),
    );

    if let Some(instruction) = skill_instruction(category, skill_name) {
        prompt.push_str(instruction);
        prompt.push_str("\n\n");
    }

    prompt.push_str("Respond only with a JSON object that matches this schema:\n");
    prompt.push_str(&schema);
    prompt.push_str("\n\n");
    prompt.push_str(RESPONSE_RULES);
    prompt
}

/// 分析レスポンスのJSONスキーマ（generationConfig.responseSchema）
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER", "description": "Strict score (0-100) for the whole technique" },
            "proScore": { "type": "NUMBER", "description": "Reference professional score (e.g. 90-95)" },
            "issues": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "severity": { "type": "STRING", "enum": ["high", "medium", "low"] },
                        "issue": { "type": "STRING", "description": "Specific flaw, e.g. 'Plant foot too far in Frame 2'" },
                        "fix": { "type": "STRING", "description": "Specific correction" }
                    },
                    "required": ["severity", "issue", "fix"]
                }
            },
            "strengths": {
                "type": "ARRAY",
                "items": { "type": "STRING", "description": "Strength, e.g. 'Good body shape in Frame 1'" }
            },
            "drills": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "drill": { "type": "STRING", "description": "Drill description" },
                        "duration": { "type": "NUMBER", "description": "Duration in minutes" }
                    },
                    "required": ["drill", "duration"]
                }
            }
        },
        "required": ["score", "proScore", "issues", "strengths", "drills"]
    })
}

/// チャットコーチへの質問ペイロード
pub fn coach_payload(question: &str) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": question }] }],
        "systemInstruction": { "parts": [{ "text": COACH_SYSTEM_PROMPT }] }
    })
}

/// テクニック分析のペイロード
///
/// 先頭にテキストパート、続いてキーフレームごとに inlineData パートを並べる
pub fn analysis_payload(capture: &TechniqueCapture) -> Value {
    let mut parts = vec![json!({
        "text": format!(
            "Analyze this {}-frame sequence for a \"{}\".",
            capture.keyframes.len(),
            capture.sub_skill_name
        )
    })];

    parts.extend(capture.keyframes.iter().map(|frame| {
        json!({
            "inlineData": { "mimeType": KEYFRAME_MIME_TYPE, "data": frame.base64() }
        })
    }));

    json!({
        "contents": [{ "parts": parts }],
        "systemInstruction": {
            "parts": [{ "text": analysis_system_prompt(capture.category, &capture.sub_skill_name) }]
        },
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": analysis_response_schema()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::capture::Keyframe;

    fn capture(category: SkillCategory, name: &str) -> TechniqueCapture {
        let frames = (0..category.required_keyframes())
            .map(|i| Keyframe::from_bytes(format!("frame-{}", i).as_bytes()))
            .collect();
        TechniqueCapture::new(category, "sub_skill", name, frames)
    }

    #[test]
    fn test_coach_payload_shape() {
        let payload = coach_payload("How do I improve my first touch?");

        assert_eq!(payload["contents"][0]["role"], "user");
        assert_eq!(
            payload["contents"][0]["parts"][0]["text"],
            "How do I improve my first touch?"
        );
        assert_eq!(
            payload["systemInstruction"]["parts"][0]["text"],
            COACH_SYSTEM_PROMPT
        );
    }

    #[test]
    fn test_analysis_payload_has_text_then_frames() {
        let capture = capture(SkillCategory::Shooting, "Power Shot");

        let payload = analysis_payload(&capture);
        let parts = payload["contents"][0]["parts"].as_array().unwrap();

        assert_eq!(parts.len(), 6);
        assert_eq!(
            parts[0]["text"],
            "Analyze this 5-frame sequence for a \"Power Shot\"."
        );
        for (part, frame) in parts[1..].iter().zip(&capture.keyframes) {
            assert_eq!(part["inlineData"]["mimeType"], "image/jpeg");
            assert_eq!(part["inlineData"]["data"], frame.base64());
        }
        assert_eq!(
            payload["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            payload["generationConfig"]["responseSchema"],
            analysis_response_schema()
        );
    }

    #[test]
    fn test_analysis_prompt_frame_descriptions() {
        let defending = analysis_system_prompt(SkillCategory::Defending, "Standing Tackle");
        assert!(defending.contains("4 sequential keyframe images"));
        assert!(defending.contains("Jockey/Stance"));
        assert!(defending.contains("SPECIAL INSTRUCTION FOR DEFENDING"));
        assert!(defending.contains("\"Standing Tackle\""));

        let positioning = analysis_system_prompt(SkillCategory::Positioning, "Finding Space");
        assert!(positioning.contains("Scan/Movement"));
        assert!(positioning.contains("SPECIAL INSTRUCTION FOR POSITIONING"));
    }

    #[test]
    fn test_passing_instruction_depends_on_skill_name() {
        let pass = analysis_system_prompt(SkillCategory::Passing, "Long Pass");
        assert!(pass.contains("SPECIAL INSTRUCTION FOR PASSING"));

        let cross = analysis_system_prompt(SkillCategory::Shooting, "Whipped CROSS");
        assert!(cross.contains("SPECIAL INSTRUCTION FOR PASSING"));

        let shot = analysis_system_prompt(SkillCategory::Shooting, "Power Shot");
        assert!(shot.contains("5 sequential keyframe images"));
        assert!(!shot.contains("SPECIAL INSTRUCTION"));
    }

    #[test]
    fn test_blank_skill_name_falls_back() {
        let prompt = analysis_system_prompt(SkillCategory::Shooting, "  ");
        assert!(prompt.contains("\"selected skill\""));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = analysis_response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["score", "proScore", "issues", "strengths", "drills"]
        );
    }
}
