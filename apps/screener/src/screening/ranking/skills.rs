//! Skill gap analysis — vocabulary coverage and job-requirement gaps.

use serde::{Deserialize, Serialize};

use crate::screening::patterns::{
    DOMAIN_SKILLS, REQUIREMENT_LINE_PATTERNS, REQUIREMENT_SPLIT_PATTERN,
    REQUIREMENT_STOP_WORDS, SOFT_SKILLS, TECHNICAL_SKILLS,
};

/// Requirement fragments must be longer than this many characters.
const MIN_REQUIREMENT_CHARS: usize = 10;
const STRENGTH_COVERAGE: f64 = 70.0;
const RECOMMENDATION_BELOW: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    SoftSkills,
    Domain,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 3] = [
        SkillCategory::Technical,
        SkillCategory::SoftSkills,
        SkillCategory::Domain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Technical => "technical",
            SkillCategory::SoftSkills => "soft_skills",
            SkillCategory::Domain => "domain",
        }
    }

    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            SkillCategory::Technical => TECHNICAL_SKILLS,
            SkillCategory::SoftSkills => SOFT_SKILLS,
            SkillCategory::Domain => DOMAIN_SKILLS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCoverage {
    pub found: Vec<String>,
    /// `found / vocabulary × 100`, always within `0.0..=100.0`.
    pub coverage: f64,
}

impl SkillCoverage {
    fn measure(text_lower: &str, category: SkillCategory) -> Self {
        let vocabulary = category.vocabulary();
        let found: Vec<String> = vocabulary
            .iter()
            .filter(|skill| text_lower.contains(*skill))
            .map(|skill| skill.to_string())
            .collect();
        let coverage = found.len() as f64 / vocabulary.len() as f64 * 100.0;
        Self { found, coverage }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysis {
    pub technical: SkillCoverage,
    pub soft_skills: SkillCoverage,
    pub domain: SkillCoverage,
}

impl SkillAnalysis {
    pub fn get(&self, category: SkillCategory) -> &SkillCoverage {
        match category {
            SkillCategory::Technical => &self.technical,
            SkillCategory::SoftSkills => &self.soft_skills,
            SkillCategory::Domain => &self.domain,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, &SkillCoverage)> + '_ {
        SkillCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Every skill found, across categories, in category order.
    pub fn all_found(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter()
            .flat_map(|(_, coverage)| coverage.found.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapResult {
    /// 0.5·technical + 0.3·soft + 0.2·domain
    pub overall_skill_coverage: f64,
    pub skill_analysis: SkillAnalysis,
    pub job_specific_gaps: Vec<String>,
    pub missing_skills_count: usize,
    pub recommendations: Vec<String>,
}

impl SkillGapResult {
    /// Categories whose coverage qualifies as a strength.
    pub fn strong_categories(&self) -> impl Iterator<Item = SkillCategory> + '_ {
        self.skill_analysis
            .iter()
            .filter(|(_, coverage)| coverage.coverage >= STRENGTH_COVERAGE)
            .map(|(category, _)| category)
    }
}

pub fn analyze_skill_gaps(text: &str, job_requirements: &[String]) -> SkillGapResult {
    let text_lower = text.to_lowercase();

    let skill_analysis = SkillAnalysis {
        technical: SkillCoverage::measure(&text_lower, SkillCategory::Technical),
        soft_skills: SkillCoverage::measure(&text_lower, SkillCategory::SoftSkills),
        domain: SkillCoverage::measure(&text_lower, SkillCategory::Domain),
    };

    let job_specific_gaps: Vec<String> = job_requirements
        .iter()
        .filter(|requirement| is_gap(requirement, &skill_analysis))
        .cloned()
        .collect();

    let overall_skill_coverage = skill_analysis.technical.coverage * 0.5
        + skill_analysis.soft_skills.coverage * 0.3
        + skill_analysis.domain.coverage * 0.2;

    SkillGapResult {
        overall_skill_coverage,
        missing_skills_count: job_specific_gaps.len(),
        recommendations: skill_recommendations(&skill_analysis, &job_specific_gaps),
        skill_analysis,
        job_specific_gaps,
    }
}

/// A multi-word requirement none of the candidate's skills appear in.
fn is_gap(requirement: &str, skills: &SkillAnalysis) -> bool {
    let requirement_lower = requirement.to_lowercase();
    let covered = skills
        .all_found()
        .any(|skill| requirement_lower.contains(skill));
    !covered && requirement.split_whitespace().count() > 1
}

fn skill_recommendations(skills: &SkillAnalysis, job_gaps: &[String]) -> Vec<String> {
    let mut recommendations: Vec<String> = skills
        .iter()
        .filter(|(_, coverage)| coverage.coverage < RECOMMENDATION_BELOW)
        .map(|(category, coverage)| {
            let missing = category.vocabulary().len() - coverage.found.len();
            format!("Develop {missing} additional {} skills", category.as_str())
        })
        .collect();

    if !job_gaps.is_empty() {
        recommendations.push(format!(
            "Address {} job-specific requirements through training or certification",
            job_gaps.len()
        ));
    }

    if recommendations.is_empty() {
        recommendations.push("Strong skill alignment - focus on deepening expertise".to_string());
    }
    recommendations
}

/// Pulls requirement phrases out of a job description.
///
/// Looks at text after "Requirements:", "Qualifications:", "Skills:",
/// "Experience:" and after "must have", "required", "essential", up to the end
/// of the line. Lines are split on bullets and dashes; fragments of at most 10
/// characters, or made only of stop words, are dropped. First occurrence wins
/// on duplicates.
pub fn extract_job_requirements(job_description: &str) -> Vec<String> {
    let mut requirements: Vec<String> = Vec::new();

    for pattern in REQUIREMENT_LINE_PATTERNS.iter() {
        for caps in pattern.captures_iter(job_description) {
            let Some(line) = caps.get(1) else {
                continue;
            };
            for item in REQUIREMENT_SPLIT_PATTERN.split(line.as_str()) {
                let item = item.trim();
                if item.chars().count() > MIN_REQUIREMENT_CHARS
                    && !is_stop_word_phrase(item)
                    && !requirements.iter().any(|existing| existing == item)
                {
                    requirements.push(item.to_string());
                }
            }
        }
    }

    requirements
}

fn is_stop_word_phrase(item: &str) -> bool {
    item.split_whitespace().all(|word| {
        let word = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        word.is_empty() || REQUIREMENT_STOP_WORDS.contains(&word.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_per_category() {
        let text = "Python and SQL developer with strong communication and machine learning.";
        let result = analyze_skill_gaps(text, &[]);
        assert_eq!(result.skill_analysis.technical.found, vec!["python", "sql"]);
        assert!((result.skill_analysis.technical.coverage - 2.0 / 9.0 * 100.0).abs() < 1e-9);
        assert_eq!(result.skill_analysis.soft_skills.found, vec!["communication"]);
        assert!((result.skill_analysis.soft_skills.coverage - 20.0).abs() < 1e-9);
        assert_eq!(result.skill_analysis.domain.found, vec!["machine learning"]);
        assert!((result.skill_analysis.domain.coverage - 20.0).abs() < 1e-9);

        let expected = 2.0 / 9.0 * 100.0 * 0.5 + 20.0 * 0.3 + 20.0 * 0.2;
        assert!((result.overall_skill_coverage - expected).abs() < 1e-9);
    }

    #[test]
    fn test_javascript_also_counts_java() {
        let result = analyze_skill_gaps("javascript", &[]);
        assert_eq!(result.skill_analysis.technical.found, vec!["java", "javascript"]);
    }

    #[test]
    fn test_coverage_is_bounded() {
        let everything = [TECHNICAL_SKILLS, SOFT_SKILLS, DOMAIN_SKILLS]
            .concat()
            .join(" ");
        for text in ["", "nothing relevant", everything.as_str()] {
            let result = analyze_skill_gaps(text, &[]);
            for (_, coverage) in result.skill_analysis.iter() {
                assert!((0.0..=100.0).contains(&coverage.coverage));
            }
            assert!((0.0..=100.0).contains(&result.overall_skill_coverage));
        }
        let full = analyze_skill_gaps(&everything, &[]);
        assert!((full.overall_skill_coverage - 100.0).abs() < 1e-9);
        assert_eq!(
            full.recommendations,
            vec!["Strong skill alignment - focus on deepening expertise"]
        );
    }

    #[test]
    fn test_job_gaps_exclude_covered_requirements() {
        let requirements = vec![
            "Production experience with Docker".to_string(),
            "Experience running Kafka clusters".to_string(),
            "Terraform".to_string(),
        ];
        let result = analyze_skill_gaps("Docker, AWS", &requirements);
        assert_eq!(
            result.job_specific_gaps,
            vec!["Experience running Kafka clusters"]
        );
        assert_eq!(result.missing_skills_count, 1);
        assert!(result
            .recommendations
            .contains(&"Address 1 job-specific requirements through training or certification".to_string()));
    }

    #[test]
    fn test_recommendations_count_missing_skills() {
        let result = analyze_skill_gaps("", &[]);
        assert_eq!(
            result.recommendations,
            vec![
                "Develop 9 additional technical skills",
                "Develop 5 additional soft_skills skills",
                "Develop 5 additional domain skills",
            ]
        );
    }

    #[test]
    fn test_extract_requirements_from_labelled_line() {
        let jd = "Senior Backend Engineer\n\
                  Requirements: Python programming • Kubernetes administration - SQL\n\
                  Nice to have: Go";
        let requirements = extract_job_requirements(jd);
        assert_eq!(
            requirements,
            vec!["Python programming", "Kubernetes administration"]
        );
    }

    #[test]
    fn test_extract_requirements_from_must_have_line() {
        let jd = "You must have production Rust experience\nMust have production Rust experience";
        let requirements = extract_job_requirements(jd);
        assert_eq!(requirements, vec!["production Rust experience"]);
    }

    #[test]
    fn test_extract_requirements_drops_stop_word_only_items() {
        let jd = "Skills: and the with or - distributed systems design";
        let requirements = extract_job_requirements(jd);
        assert_eq!(requirements, vec!["distributed systems design"]);
    }

    #[test]
    fn test_extract_requirements_empty_description() {
        assert!(extract_job_requirements("").is_empty());
    }

    #[test]
    fn test_strong_categories() {
        let text = "python java javascript sql aws docker kubernetes";
        let result = analyze_skill_gaps(text, &[]);
        let strong: Vec<SkillCategory> = result.strong_categories().collect();
        assert_eq!(strong, vec![SkillCategory::Technical]);
    }
}
