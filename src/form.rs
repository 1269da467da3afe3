// ABOUTME: Freeform profile form and the heuristics that turn it into a Profile.
// ABOUTME: Blank sections fall back to starter content so the page is never empty.

use serde::{Deserialize, Serialize};

use crate::types::{Experience, Profile, ProfileError, Project};

const DEFAULT_TITLE: &str = "Student";
const DEFAULT_SKILLS: [&str; 6] = ["JavaScript", "React", "Node.js", "HTML/CSS", "Git", "Python"];
const PLACEHOLDER_LINK: &str = "https://github.com/example/project";
const EXCERPT_CHARS: usize = 200;

/// Raw form input, as typed by the user.
///
/// `skills` is comma separated. `projects` has one `title - description` per
/// line and `experience` one `title - organization - duration - description`
/// per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub projects: String,
    #[serde(default)]
    pub experience: String,
}

impl ProfileForm {
    /// Build a profile, rejecting forms without a name or email.
    pub fn into_profile(self) -> Result<Profile, ProfileError> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if email.is_empty() {
            return Err(ProfileError::EmptyEmail);
        }

        let title = match self.title.trim() {
            "" => DEFAULT_TITLE.to_string(),
            t => t.to_string(),
        };
        let bio = match self.bio.trim() {
            "" => default_bio(&title),
            b => b.to_string(),
        };

        Ok(Profile {
            name,
            title,
            email,
            bio,
            skills: parse_skills(&self.skills),
            projects: parse_projects(&self.projects),
            experience: parse_experience(&self.experience),
        })
    }
}

fn default_bio(title: &str) -> String {
    format!(
        "Passionate {} with a strong foundation in technology and a drive to create \
         innovative solutions. Currently pursuing my degree while building practical \
         experience through hands-on projects and continuous learning.",
        title.to_lowercase()
    )
}

pub fn parse_skills(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect();
    }
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_projects(text: &str) -> Vec<Project> {
    if text.trim().is_empty() {
        return vec![
            Project {
                title: "Portfolio Website".to_string(),
                description: "Responsive personal portfolio showcasing projects and skills \
                              with modern design."
                    .to_string(),
                tech: vec![
                    "React".to_string(),
                    "TypeScript".to_string(),
                    "Tailwind CSS".to_string(),
                ],
                link: Some("https://github.com/example/portfolio".to_string()),
            },
            Project {
                title: "Weather Dashboard".to_string(),
                description: "Real-time weather application with location-based forecasts \
                              and interactive charts."
                    .to_string(),
                tech: vec![
                    "JavaScript".to_string(),
                    "Chart.js".to_string(),
                    "OpenWeather API".to_string(),
                ],
                link: Some("https://github.com/example/weather-app".to_string()),
            },
        ];
    }

    let projects: Vec<Project> = lines(text)
        .map(|line| {
            let mut parts = line.split('-').map(str::trim);
            Project {
                title: field(parts.next(), "Project"),
                description: field(parts.next(), "Project description"),
                tech: vec!["JavaScript".to_string(), "React".to_string()],
                link: Some(PLACEHOLDER_LINK.to_string()),
            }
        })
        .collect();

    if projects.is_empty() {
        return vec![Project {
            title: "Personal Project".to_string(),
            description: excerpt(text),
            tech: vec!["JavaScript".to_string(), "React".to_string()],
            link: Some(PLACEHOLDER_LINK.to_string()),
        }];
    }
    projects
}

pub fn parse_experience(text: &str) -> Vec<Experience> {
    if text.trim().is_empty() {
        return vec![Experience {
            title: "Student".to_string(),
            organization: "University".to_string(),
            duration: "2022 - Present".to_string(),
            description: "Currently pursuing my degree with focus on practical application \
                          of technology and continuous learning."
                .to_string(),
        }];
    }

    let entries: Vec<Experience> = lines(text)
        .map(|line| {
            let mut parts = line.split('-').map(str::trim);
            Experience {
                title: field(parts.next(), "Position"),
                organization: field(parts.next(), "Company"),
                duration: field(parts.next(), "2025"),
                description: field(parts.next(), "Experience description"),
            }
        })
        .collect();

    if entries.is_empty() {
        return vec![Experience {
            title: "Experience".to_string(),
            organization: "Organization".to_string(),
            duration: "2025".to_string(),
            description: excerpt(text),
        }];
    }
    entries
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

fn field(part: Option<&str>, fallback: &str) -> String {
    match part {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => fallback.to_string(),
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProfileForm {
        ProfileForm {
            name: " Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn blank_form_sections_get_defaults() {
        let profile = form().into_profile().unwrap();
        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.title, "Student");
        assert!(profile.bio.starts_with("Passionate student"));
        assert_eq!(profile.skills.len(), 6);
        assert_eq!(profile.projects.len(), 2);
        assert_eq!(profile.experience[0].organization, "University");
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut f = form();
        f.name = "   ".to_string();
        assert_eq!(f.into_profile(), Err(ProfileError::EmptyName));
    }

    #[test]
    fn missing_email_is_rejected() {
        let mut f = form();
        f.email.clear();
        assert_eq!(f.into_profile(), Err(ProfileError::EmptyEmail));
    }

    #[test]
    fn skills_are_split_and_trimmed() {
        assert_eq!(parse_skills("Rust, , Go ,SQL"), vec!["Rust", "Go", "SQL"]);
    }

    #[test]
    fn project_lines_split_on_hyphen() {
        let projects = parse_projects("Analytical Engine - Mechanical computer\n\nNotes\n");
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "Analytical Engine");
        assert_eq!(projects[0].description, "Mechanical computer");
        assert_eq!(projects[1].title, "Notes");
        assert_eq!(projects[1].description, "Project description");
    }

    #[test]
    fn experience_lines_fill_missing_fields() {
        let entries = parse_experience("Analyst - Babbage & Co - 1843");
        assert_eq!(entries[0].title, "Analyst");
        assert_eq!(entries[0].organization, "Babbage & Co");
        assert_eq!(entries[0].duration, "1843");
        assert_eq!(entries[0].description, "Experience description");
    }
}
