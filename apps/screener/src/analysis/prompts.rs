use crate::llm_client::prompts::truncate_chars;

pub const RESUME_CHAR_LIMIT: usize = 4000;
pub const JOB_DESCRIPTION_CHAR_LIMIT: usize = 2000;

/// Structured resume analysis. Relevance is judged against the job description
/// when one is supplied, otherwise against a general software engineering role.
pub fn build_resume_analysis_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let target = match job_description {
        Some(jd) => format!(
            "the following role:\n\nJOB DESCRIPTION:\n{}",
            truncate_chars(jd, JOB_DESCRIPTION_CHAR_LIMIT)
        ),
        None => "a software engineering role".to_string(),
    };

    format!(
        r#"Analyze the following resume and provide a comprehensive assessment.

RESUME TEXT:
{resume}

Provide:
1. Years of experience (numeric value)
2. Key skills and technologies
3. Previous job roles and companies
4. Education background
5. Certifications
6. Projects and achievements
7. Hidden or related skills (e.g. "TensorFlow" implies "Deep Learning")
8. Overall relevance score (0-100) for {target}
9. Categorization: "Highly Qualified", "Qualified", or "Not a Fit"
10. Brief summary of the candidate's strengths and weaknesses

Respond with JSON using exactly these keys:
{{
  "years_experience": number,
  "key_skills": ["skill1", "skill2"],
  "hidden_skills": ["hidden_skill1"],
  "previous_roles": ["role1 at company1"],
  "education": "degree, institution, year",
  "certifications": ["cert1"],
  "projects_achievements": ["project1"],
  "relevance_score": number,
  "category": "Highly Qualified|Qualified|Not a Fit",
  "summary": "brief summary text"
}}"#,
        resume = truncate_chars(resume_text, RESUME_CHAR_LIMIT),
    )
}

pub fn build_job_match_prompt(job_description: &str, resume_text: &str) -> String {
    format!(
        r#"Compare the following job description and resume text.

JOB DESCRIPTION:
{jd}

RESUME TEXT:
{resume}

Provide:
1. A match score (0-100) indicating how well the resume fits the job description.
2. A natural language explanation of why the candidate matches or does not match.

Respond with JSON using exactly these keys:
{{
  "match_score": number,
  "explanation": "text"
}}"#,
        jd = truncate_chars(job_description, JOB_DESCRIPTION_CHAR_LIMIT),
        resume = truncate_chars(resume_text, RESUME_CHAR_LIMIT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_prompt_truncates_long_text() {
        let resume = "x".repeat(RESUME_CHAR_LIMIT + 500);
        let prompt = build_resume_analysis_prompt(&resume, None);
        assert!(prompt.contains(&"x".repeat(RESUME_CHAR_LIMIT)));
        assert!(!prompt.contains(&"x".repeat(RESUME_CHAR_LIMIT + 1)));
        assert!(prompt.contains("software engineering role"));
    }

    #[test]
    fn test_resume_prompt_embeds_job_description() {
        let prompt = build_resume_analysis_prompt("resume", Some("Staff data engineer"));
        assert!(prompt.contains("JOB DESCRIPTION:\nStaff data engineer"));
    }

    #[test]
    fn test_job_match_prompt_contains_both_texts() {
        let prompt = build_job_match_prompt("Rust backend role", "Built Rust services");
        assert!(prompt.contains("Rust backend role"));
        assert!(prompt.contains("Built Rust services"));
        assert!(prompt.contains("\"match_score\": number"));
    }
}
