use serde::{Deserialize, Serialize};

/// Skill category used to route JD keyword buckets to the right part of the profile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    #[default]
    Technical,
    Soft,
    Methodology,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub category: SkillCategory,
}

/// One work-experience entry with its achievement bullets in resume order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// Candidate profile as supplied by the caller. Never mutated by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: String,
    pub years_experience: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub willing_to_relocate: bool,
    #[serde(default)]
    pub willing_to_travel: bool,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<ExperienceEntry>,
}

impl Profile {
    pub fn skills_in(&self, category: SkillCategory) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(move |s| s.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let json = r#"{
            "years_experience": 6.5,
            "skills": [
                {"name": "Rust"},
                {"name": "Scrum", "category": "methodology"},
                {"name": "Mentoring", "category": "soft"}
            ],
            "experiences": [
                {"id": "acme", "title": "Engineer", "achievements": ["Shipped things"]}
            ]
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert!((profile.years_experience - 6.5).abs() < f64::EPSILON);
        assert!(profile.location.is_none());
        assert!(!profile.willing_to_relocate);
        assert_eq!(profile.skills[0].category, SkillCategory::Technical);
        assert_eq!(profile.experiences[0].company, "");
        assert_eq!(profile.experiences[0].achievements.len(), 1);
    }

    #[test]
    fn test_skills_in_filters_by_category() {
        let profile = Profile {
            name: String::new(),
            summary: String::new(),
            years_experience: 1.0,
            location: None,
            willing_to_relocate: false,
            willing_to_travel: false,
            skills: vec![
                Skill {
                    name: "Kanban".to_string(),
                    category: SkillCategory::Methodology,
                },
                Skill {
                    name: "Go".to_string(),
                    category: SkillCategory::Technical,
                },
            ],
            experiences: vec![],
        };
        let methodology: Vec<_> = profile
            .skills_in(SkillCategory::Methodology)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(methodology, vec!["Kanban"]);
    }
}
