//! Prompt templates for the deliberation flow.
//!
//! Each template yields the full prompt for one outbound call. The
//! review template pins the `FINAL RANKING:` output format the rank
//! extractor parses first.

use crate::deliberation::label::Label;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Tool instructions injected into every drafting prompt: numeric
    /// work must go through `CALCULATE(...)` markup so the engine can
    /// substitute exact values afterwards.
    pub fn calculator_instructions() -> &'static str {
        r#"**IMPORTANT - CALCULATOR TOOL:**
For ANY numerical calculation, wrap the expression in CALCULATE().
Format: CALCULATE(expression)

Examples:
- CALCULATE(22.5 * 18 * 1.5) -> computes the exact value
- CALCULATE(tan(radians(30))) -> tangent of 30 degrees
- CALCULATE(sqrt(2) * 100) -> sqrt(2) x 100

Available functions: sin, cos, tan, asin, acos, atan, sqrt, exp, log, log10,
radians, degrees, abs, round, floor, ceil, min, max, pow, and the constants pi, e.

DO NOT do mental math. ALWAYS wrap numerical computations in CALCULATE()."#
    }

    /// Stage 1: independent drafting against the retrieved context.
    pub fn draft_prompt(query: &str, context: &str) -> String {
        format!(
            r#"You are a senior subject-matter expert serving on a technical council.
First, review the RETRIEVED CONTEXT below. It may contain relevant theory,
similar solved exercises, applicable standards, and specific clauses.

Context:
{context}

{instructions}

Task:
Solve the following problem.
1. Identify the specific sections or clauses in the context that govern this problem.
2. If similar solved exercises are present, analyze them and use their method as a precedent.
3. Explain why the referenced material applies to the specifics of the request.
4. Cite the theory or source from the context.
5. Show your steps, calculations, and final result cleanly.
6. Use CALCULATE() for all numerical computations.

Problem: {query}"#,
            context = context,
            instructions = Self::calculator_instructions(),
            query = query,
        )
    }

    /// Stage 2: anonymized peer review with a strict output format.
    pub fn review_prompt(drafts: &[(Label, &str)]) -> String {
        let mut anonymized = String::new();
        for (label, content) in drafts {
            anonymized.push_str(&format!("\n--- SOLUTION {label} ---\n{content}\n"));
        }

        format!(
            r#"You are a technical reviewer for an expert council.
Review the following solutions and RANK them from BEST to WORST based on:
- Accuracy of method
- Correctness of calculation
- Clarity

Solutions:
{anonymized}

Output Format STRICTLY:
FINAL RANKING: [Best Label] > [2nd Best] > ...
CRITIQUE: [Brief explanation]"#,
        )
    }

    /// Stage 3: the chair rewrites the winning draft into the final answer.
    pub fn synthesis_prompt(
        query: &str,
        winner: Label,
        winning_draft: &str,
        peer_comments: &[(String, String)],
    ) -> String {
        let comments = peer_comments
            .iter()
            .map(|(reviewer, comment)| format!("{reviewer}: {comment}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are the Chair of the council.
The council has debated and selected Solution {winner} as the best.

User Query: {query}

Winning Solution ({winner}):
{winning_draft}

Peer Comments:
{comments}

Task:
Synthesize the FINAL, definitive answer.
Correct any minor issues noted by peers if necessary.
Format cleanly as a final report."#,
        )
    }

    /// Compliance review of the finished answer.
    pub fn critic_prompt(query: &str, plan: &str, answer: &str) -> String {
        format!(
            r#"You are The Critic, a compliance reviewer.
Review the following solution package.

User Query: {query}
Plan: {plan}
Result: {answer}

Instructions:
1. Check that the result makes physical sense.
2. Check for unit consistency.
3. Verify that typical safety factors were considered, where applicable.

Output:
If PASS: "APPROVED. [Summary of result]"
If FAIL: "REJECTED. [Reason]""#,
        )
    }

    // ==================== Exam council ====================

    /// Ask one member to propose a high-level exam structure.
    pub fn exam_structure_prompt(query: &str, context: &str) -> String {
        format!(
            r#"You are a member of an exam board.
User Request: {query}

Context (previous exams, standards):
{context}

Task:
Propose a high-level EXAM STRUCTURE (outline only).
- Targeted difficulty level.
- Number of questions.
- Topics per question (theory vs calculation vs design).
- Justify the choice based on the context."#,
        )
    }

    /// The chair consolidates the structure proposals into one plan.
    pub fn exam_plan_prompt(proposals: &[(String, String)]) -> String {
        let joined = proposals
            .iter()
            .map(|(proposer, text)| format!("--- Proposal by {proposer} ---\n{text}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are the Exam Chair. Synthesize a SINGLE exam structure based on these proposals:\n{joined}\n\nOutput the consolidated plan."
        )
    }

    /// One author drafts the full paper from the agreed plan.
    pub fn exam_author_prompt(plan: &str) -> String {
        format!(
            r#"You are the Exam Author.
Draft the FULL EXAM CONTENT based on this plan:
{plan}

Use the context to ensure questions are realistic and technically accurate.
Reference specific standards where applicable.

Format:
**Question 1** (X points): [Text]
**Question 2** (X points): [Text]
..."#,
        )
    }

    /// The external examiner signs off or requests changes.
    pub fn exam_review_prompt(draft: &str) -> String {
        format!(
            r#"You are the External Examiner.
Review this draft exam:
{draft}

Check for:
- Clarity
- Fairness and difficulty balance
- Alignment with the plan

If good, output 'APPROVED'. If not, list specific changes."#,
        )
    }

    /// One refinement round when the examiner rejects the draft.
    pub fn exam_refine_prompt(draft: &str, feedback: &str) -> String {
        format!(
            r#"Refine this exam based on feedback.
Draft: {draft}
Feedback: {feedback}
Output FINAL EXAM text only."#,
        )
    }
}
