//! Prompt templates for post generation and rewriting
//!
//! The generation prompt embeds every constraint of a workflow so the model
//! sees length, audience, style and keywords in one place.

use crate::instructions::{ConstraintType, LengthConstraint, Workflow};
use crate::seo::Suggestion;

/// Prompt templates for the content pipeline
pub struct ContentPrompts;

impl ContentPrompts {
    /// Full generation prompt for a workflow
    pub fn generation_prompt(workflow: &Workflow) -> String {
        let length = &workflow.length_constraints;
        let style = &workflow.style_constraints;
        let content = &workflow.content_constraints;

        let mut prompt = format!(
            "You are an expert content writer. Write {} about \"{}\".\n\n",
            content_type_description(&workflow.content_type),
            workflow.topic
        );

        prompt.push_str("LENGTH REQUIREMENTS:\n");
        prompt.push_str(&length_requirement(length));
        prompt.push_str("\n\n");

        prompt.push_str("TARGET AUDIENCE:\n");
        prompt.push_str(&format!(
            "- Level: {}\n- Industry: {}\n- Expertise: {}\n- Approach: {}\n\n",
            workflow.audience.level,
            workflow.audience.industry,
            workflow.audience.expertise,
            audience_approach(&workflow.audience.level)
        ));

        prompt.push_str("STYLE:\n");
        prompt.push_str(&format!(
            "- Tone: {}\n- Complexity: {}\n- Format: {}\n- Voice: {}\n- Perspective: {}\n\n",
            style.tone, style.complexity, style.format, style.voice, style.perspective
        ));

        prompt.push_str("CONTENT:\n");
        prompt.push_str(&format!("- Depth: {}\n", content.depth_level));
        if !content.must_include.is_empty() {
            prompt.push_str(&format!("- Must include: {}\n", content.must_include.join(", ")));
        }
        if !content.should_include.is_empty() {
            prompt.push_str(&format!("- Should include: {}\n", content.should_include.join(", ")));
        }
        if !content.must_exclude.is_empty() {
            prompt.push_str(&format!("- Must NOT include: {}\n", content.must_exclude.join(", ")));
        }
        prompt.push_str(&format!("- Supporting data: {}\n\n", content.data_requirements));

        let keywords = &workflow.seo_constraints.primary_keywords;
        if !keywords.is_empty() {
            prompt.push_str("SEO KEYWORDS:\n");
            prompt.push_str(&format!("- Primary: {}\n", keywords.join(", ")));
            let secondary = &workflow.seo_constraints.secondary_keywords;
            if !secondary.is_empty() {
                prompt.push_str(&format!("- Secondary: {}\n", secondary.join(", ")));
            }
            prompt.push('\n');
        }

        prompt.push_str(
            "EXECUTION:\n\
             1. Start with a single H1 title (\"# \") that contains the primary keyword\n\
             2. Organize the body with at least two H2 sections (\"## \")\n\
             3. Use the primary keyword naturally, without stuffing\n\
             4. Keep sentences short and paragraphs focused\n\
             5. Output markdown only, with no preamble or closing notes\n",
        );

        if length.has_critical_limit {
            if let Some(limit) = length.word_limit {
                prompt.push_str(&format!(
                    "\nCRITICAL REMINDER: the word limit of {limit} words is mandatory. Count your words before answering.\n"
                ));
            }
        }

        prompt
    }

    /// Rewrite prompt carrying the current body and the SEO findings
    pub fn rewrite_prompt(body: &str, primary_keyword: &str, suggestions: &[Suggestion]) -> String {
        let findings = if suggestions.is_empty() {
            "- No specific issues; polish clarity and flow\n".to_string()
        } else {
            suggestions
                .iter()
                .map(|s| format!("- [{}] {}\n", s.priority, s.message))
                .collect()
        };

        format!(
            "Rewrite the following blog post to improve its SEO for the primary keyword \"{primary_keyword}\".\n\n\
             ISSUES TO FIX:\n{findings}\n\
             RULES:\n\
             - Keep the facts, topic and overall message\n\
             - Keep a single H1 title and at least two H2 sections\n\
             - Aim for 1200 to 1800 words and a keyword density between 1% and 3%\n\
             - Output markdown only\n\n\
             POST:\n{body}\n"
        )
    }
}

/// Human-readable description of a content type
pub fn content_type_description(content_type: &str) -> &'static str {
    match content_type {
        "guide" => "a practical guide with actionable steps",
        "tutorial" => "a step-by-step tutorial",
        "listicle" => "a list-based article with scannable items",
        "review" => "a balanced review comparing strengths and weaknesses",
        "news" => "a timely news article",
        "case-study" => "a case study with context, approach and results",
        _ => "an engaging, informative blog post",
    }
}

/// Structure hint bucketed by word limit
pub fn length_strategy(word_limit: u32) -> &'static str {
    match word_limit {
        0..=300 => "bullet points only, no long paragraphs",
        301..=500 => "3-4 key points with brief explanations",
        501..=800 => "5-6 points with short examples",
        _ => "comprehensive coverage with detailed sections",
    }
}

fn length_requirement(length: &LengthConstraint) -> String {
    let Some(limit) = length.word_limit else {
        return "- No specific length; write what the topic needs".to_string();
    };

    let target = match length.constraint_type {
        ConstraintType::Exact => format!("EXACTLY {limit} words"),
        ConstraintType::Maximum => format!("NO MORE THAN {limit} words"),
        ConstraintType::Minimum => format!("AT LEAST {limit} words"),
        ConstraintType::Flexible => format!("about {limit} words"),
    };

    format!(
        "- Target: {target} ({} priority)\n- Strategy: {}",
        length.priority,
        length_strategy(limit)
    )
}

fn audience_approach(level: &str) -> &'static str {
    match level {
        "beginners" => "explain terms, avoid jargon, and build up from the basics",
        "professionals" => "focus on practical application, tools and measurable outcomes",
        "experts" => "skip the basics and go deep on nuance, trade-offs and data",
        _ => "stay accessible while offering concrete value",
    }
}
