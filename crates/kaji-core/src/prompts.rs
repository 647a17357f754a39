// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Prompt templates for the analysis call and the discussion system
//! instruction. Both ask for the constrained markdown subset the renderer
//! understands (headings, bullet lists, bold).

/// Build the single-shot analysis prompt for a topic.
pub fn analysis_prompt(persona: &str, topic: &str, extra: Option<&str>) -> String {
    let mut prompt = format!(
        "You are {persona}.\n\
         A user wants to examine the following topic: \"{topic}\"\n\
         \n\
         Your task is to:\n\
         1. Identify the most relevant, well-established sources or references on this topic.\n\
         2. Summarise what they actually say, quoting the key passages.\n\
         3. Provide a detailed analysis with particular attention to how reliable each\n\
            source is and where they disagree.\n\
         \n\
         The analysis must cover:\n\
         - **Key Findings:** state the central claims clearly.\n\
         - **Sources:** name the principal sources behind each claim.\n\
         - **Reliability:** discuss how trustworthy those sources are and why.\n\
         - **Relevance:** explain briefly how the findings answer the user's topic.\n\
         \n\
         Structure your entire response using Markdown. Use clear headings for each\n\
         section and bullet lists for enumerations.\n"
    );
    if let Some(extra) = extra {
        prompt.push('\n');
        prompt.push_str(extra);
        prompt.push('\n');
    }
    prompt
}

/// Build the system instruction for the follow-up discussion.
///
/// Embeds the topic and the full analysis so every turn stays grounded in
/// what was already presented to the user.
pub fn discussion_system(persona: &str, topic: &str, analysis: &str) -> String {
    format!(
        "You are {persona}. You are discussing a topic and its analysis with the user.\n\
         The initial topic was: \"{topic}\"\n\
         \n\
         The analysis that was presented is:\n\
         \"{analysis}\"\n\
         \n\
         Answer the user's follow-up questions concisely and accurately, always in the\n\
         context of the information above. Format your answers using markdown."
    )
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
