// Project showcase filtering.
// Narrow projects and their pull requests by project, technology, and free text.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    #[serde(default)]
    pub pull_requests: Vec<PullRequest>,
    pub category: Option<String>,
}

impl Project {
    fn uses(&self, tech: &str) -> bool {
        self.technologies.iter().any(|t| t == tech)
    }

    /// `needle` must already be lowercase.
    fn mentions(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || contains(&self.description, needle)
            || self.technologies.iter().any(|t| contains(t, needle))
    }
}

impl PullRequest {
    fn mentions(&self, needle: &str) -> bool {
        contains(&self.title, needle)
            || contains(&self.description, needle)
            || self.technologies.iter().any(|t| contains(t, needle))
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Current filter selection. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectFilters {
    pub active_project_id: Option<String>,
    pub active_tech: Option<String>,
    pub search_text: String,
}

impl ProjectFilters {
    fn search(&self) -> Option<String> {
        if self.search_text.trim().is_empty() {
            None
        } else {
            Some(self.search_text.to_lowercase())
        }
    }
}

/// Apply `filters` to `projects`, keeping their order.
///
/// A technology keeps a pull request when either the pull request or its
/// project lists it (exact match). Search text matches case-insensitively
/// against the pull request and its project. Once a technology or search is
/// active, projects left without pull requests are dropped, unless the
/// project itself matches the search.
pub fn filter_projects(projects: &[Project], filters: &ProjectFilters) -> Vec<Project> {
    let search = filters.search();
    let tech = filters.active_tech.as_deref();

    let filtered: Vec<Project> = projects
        .iter()
        .filter(|p| {
            filters
                .active_project_id
                .as_deref()
                .is_none_or(|id| p.id == id)
        })
        .filter_map(|project| {
            if tech.is_none() && search.is_none() {
                return Some(project.clone());
            }

            let pull_requests: Vec<PullRequest> = project
                .pull_requests
                .iter()
                .filter(|pr| {
                    tech.is_none_or(|t| pr.technologies.iter().any(|x| x == t) || project.uses(t))
                })
                .filter(|pr| {
                    search
                        .as_deref()
                        .is_none_or(|s| pr.mentions(s) || project.mentions(s))
                })
                .cloned()
                .collect();

            let project_matches = search.as_deref().is_some_and(|s| project.mentions(s));
            if pull_requests.is_empty() && !project_matches {
                return None;
            }
            Some(Project {
                pull_requests,
                ..project.clone()
            })
        })
        .collect();

    debug!(
        kept = filtered.len(),
        of = projects.len(),
        prs = total_prs(&filtered),
        "filtered projects"
    );
    filtered
}

/// Every technology named by a project or one of its pull requests, sorted
/// and without duplicates.
pub fn technology_options(projects: &[Project]) -> Vec<String> {
    let mut techs = BTreeSet::new();
    for project in projects {
        techs.extend(project.technologies.iter().cloned());
        for pr in &project.pull_requests {
            techs.extend(pr.technologies.iter().cloned());
        }
    }
    techs.into_iter().collect()
}

/// `(id, name)` pairs for the project selector, in listing order.
pub fn project_options(projects: &[Project]) -> Vec<(String, String)> {
    projects
        .iter()
        .map(|p| (p.id.clone(), p.name.clone()))
        .collect()
}

pub fn total_prs(projects: &[Project]) -> usize {
    projects.iter().map(|p| p.pull_requests.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr(id: &str, title: &str, techs: &[&str]) -> PullRequest {
        PullRequest {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            technologies: techs.iter().map(|t| t.to_string()).collect(),
            url: None,
        }
    }

    fn project(id: &str, name: &str, techs: &[&str], prs: Vec<PullRequest>) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{} overview", name),
            technologies: techs.iter().map(|t| t.to_string()).collect(),
            github_url: None,
            live_url: None,
            pull_requests: prs,
            category: None,
        }
    }

    fn sample() -> Vec<Project> {
        vec![
            project(
                "offer-hub",
                "Offer-Hub",
                &["Next.js", "TypeScript"],
                vec![
                    pr("oh-1", "Review system", &["Jest"]),
                    pr("oh-2", "Payment flow", &["REST API"]),
                ],
            ),
            project(
                "stellar-kit",
                "Stellar Kit",
                &["Rust"],
                vec![pr("sk-1", "Wallet sync", &["Soroban"])],
            ),
            project(
                "docs",
                "Docs Portal",
                &["Markdown"],
                vec![pr("d-1", "Search index", &["Algolia"])],
            ),
        ]
    }

    fn ids(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_filters_keep_everything() {
        let projects = sample();
        let filtered = filter_projects(&projects, &ProjectFilters::default());
        assert_eq!(filtered, projects);
        assert_eq!(total_prs(&filtered), 4);
    }

    #[test]
    fn test_filter_by_project_id() {
        let filters = ProjectFilters {
            active_project_id: Some("stellar-kit".into()),
            ..Default::default()
        };
        let filtered = filter_projects(&sample(), &filters);
        assert_eq!(ids(&filtered), ["stellar-kit"]);

        let filters = ProjectFilters {
            active_project_id: Some("missing".into()),
            ..Default::default()
        };
        assert!(filter_projects(&sample(), &filters).is_empty());
    }

    #[test]
    fn test_project_technology_keeps_all_its_prs() {
        let filters = ProjectFilters {
            active_tech: Some("TypeScript".into()),
            ..Default::default()
        };
        let filtered = filter_projects(&sample(), &filters);
        assert_eq!(ids(&filtered), ["offer-hub"]);
        assert_eq!(total_prs(&filtered), 2);
    }

    #[test]
    fn test_pr_technology_narrows_prs() {
        let filters = ProjectFilters {
            active_tech: Some("Jest".into()),
            ..Default::default()
        };
        let filtered = filter_projects(&sample(), &filters);
        assert_eq!(ids(&filtered), ["offer-hub"]);
        assert_eq!(filtered[0].pull_requests[0].id, "oh-1");
        assert_eq!(total_prs(&filtered), 1);
    }

    #[test]
    fn test_technology_match_is_exact() {
        let filters = ProjectFilters {
            active_tech: Some("rust".into()),
            ..Default::default()
        };
        assert!(filter_projects(&sample(), &filters).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filters = ProjectFilters {
            search_text: "WALLET".into(),
            ..Default::default()
        };
        let filtered = filter_projects(&sample(), &filters);
        assert_eq!(ids(&filtered), ["stellar-kit"]);
        assert_eq!(total_prs(&filtered), 1);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filters = ProjectFilters {
            search_text: "   ".into(),
            ..Default::default()
        };
        assert_eq!(filter_projects(&sample(), &filters).len(), 3);
    }

    #[test]
    fn test_project_match_survives_empty_prs() {
        // Tech filter empties the PRs; the name still matches the search.
        let filters = ProjectFilters {
            active_tech: Some("Soroban".into()),
            search_text: "docs portal".into(),
            ..Default::default()
        };
        let filtered = filter_projects(&sample(), &filters);
        assert_eq!(ids(&filtered), ["docs"]);
        assert!(filtered[0].pull_requests.is_empty());
        assert_eq!(total_prs(&filtered), 0);
    }

    #[test]
    fn test_project_match_keeps_its_prs() {
        let filters = ProjectFilters {
            search_text: "offer".into(),
            ..Default::default()
        };
        let filtered = filter_projects(&sample(), &filters);
        assert_eq!(ids(&filtered), ["offer-hub"]);
        assert_eq!(total_prs(&filtered), 2);
    }

    #[test]
    fn test_technology_options_sorted_and_unique() {
        let mut projects = sample();
        projects[1].pull_requests.push(pr("sk-2", "Docs", &["Rust", "Jest"]));
        assert_eq!(
            technology_options(&projects),
            [
                "Algolia",
                "Jest",
                "Markdown",
                "Next.js",
                "REST API",
                "Rust",
                "Soroban",
                "TypeScript"
            ]
        );
    }

    #[test]
    fn test_project_options_follow_listing_order() {
        let options = project_options(&sample());
        assert_eq!(options[0], ("offer-hub".to_string(), "Offer-Hub".to_string()));
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn test_deserializes_site_data() {
        let json = r#"{
            "id": "offer-hub",
            "name": "Offer-Hub",
            "description": "Freelance marketplace",
            "technologies": ["Next.js"],
            "githubUrl": "https://github.com/example/offer-hub",
            "pullRequests": [
                {"id": "oh-1", "title": "Reviews", "description": "Backend wiring", "technologies": ["Jest"]}
            ]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.github_url.as_deref(), Some("https://github.com/example/offer-hub"));
        assert_eq!(project.pull_requests.len(), 1);
        assert!(project.live_url.is_none());
    }
}
