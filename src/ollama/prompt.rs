//! Prompt construction for commit message generation.

/// Instructions placed before the diff.
const INSTRUCTIONS: &str = r#"You are given a Git diff. Your task is to generate a clear and concise commit message that follows the Conventional Commits specification.

## Conventional Commits
A Conventional Commit consists of a structured message with a type, an optional scope, and a short description:

<type>(<optional scope>): <short description>

Common types:
- feat: A new feature
- fix: A bug fix
- docs: Documentation-only changes
- style: Code style changes (formatting, missing semicolons, etc.)
- refactor: Code change that neither fixes a bug nor adds a feature
- perf: Performance improvements
- test: Adding or updating tests
- chore: Routine tasks (build process, dependencies, etc.)

## Your Task
1. Analyze the diff.
2. Create a short, meaningful commit title that clearly summarizes the change using the Conventional Commits format.
3. Optionally, write a description explaining what was changed and why.

## Output Format
Return the result as a Git commit command in the following format:

git commit -m "<title>" -m "<description>"

Do not include any additional text or explanations in your response. Only return the git commit instruction.

## Diff
"#;

/// Build the prompt for the model from a staged diff.
///
/// The diff is appended verbatim; it is never parsed or sanitized.
pub fn build_prompt(diff: &str) -> String {
    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + diff.len());
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str(diff);
    prompt
}
