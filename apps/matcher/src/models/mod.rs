pub mod job;
pub mod profile;

pub use job::JobPosting;
pub use profile::{ExperienceEntry, Profile, Skill, SkillCategory};
