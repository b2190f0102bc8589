//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation of
//! concerns. Every implementation produces markdown for the terminal renderer.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{Plan, PlanSummary, QuizData, ResolvedResource, ResourceEmbed, Step, User},
    parser,
    quiz::AnswerFeedback,
};

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        if let Some(created_at) = &self.created_at {
            writeln!(f, "- Created: {}", LocalDateTime(created_at))?;
            writeln!(f)?;
        }

        let parsed = parser::parse_plan(&self.content_md);
        if let Some(preamble) = &parsed.preamble {
            writeln!(f, "{preamble}")?;
            writeln!(f)?;
        }

        if parsed.steps.is_empty() {
            writeln!(f, "No steps in this plan.")?;
        } else {
            writeln!(f, "## Steps")?;
            writeln!(f)?;
            for (index, step) in parsed.steps.iter().enumerate() {
                writeln!(f, "{}. {}", index + 1, step.title)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.title)?;
        writeln!(f)?;
        if !self.content.is_empty() {
            writeln!(f, "{}", self.content)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps = match self.total_steps {
            1 => " (1 step)".to_string(),
            n => format!(" ({n} steps)"),
        };

        writeln!(f, "## {} (ID: {}){steps}", self.title, self.id)?;
        writeln!(f)?;

        if let Some(created_at) = &self.created_at {
            writeln!(f, "- **Created**: {}", LocalDateTime(created_at))?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for ResourceEmbed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceEmbed::Video { player_url, .. } => {
                writeln!(f, "**Video**: [{player_url}]({player_url})")
            }
            ResourceEmbed::Page { url } => {
                writeln!(f, "**Resource**: [{url}]({url})")?;
                writeln!(f)?;
                writeln!(f, "*Open in your browser if it does not display inline.*")
            }
            ResourceEmbed::Text(markdown) => writeln!(f, "{markdown}"),
            ResourceEmbed::Empty => writeln!(f, "No resource available for this step."),
        }
    }
}

impl fmt::Display for ResolvedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.embed())
    }
}

impl fmt::Display for QuizData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**{}**", self.question)?;
        writeln!(f)?;
        for (index, option) in self.options.iter().enumerate() {
            writeln!(f, "{}. {option}", index + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for AnswerFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        if let Some(total) = self.reward.and_then(|reward| reward.total_points) {
            writeln!(f)?;
            writeln!(f, "- Total XP: {total}")?;
        }
        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Email**: {}", self.email)?;
        writeln!(f, "- **XP**: {}", self.total_points)?;
        if let Some(kudos) = self.kudos {
            writeln!(f, "- **Kudos**: {kudos}")?;
        }
        Ok(())
    }
}

/// A step shown on its own, with its position and resolved resource.
pub struct StepView<'a> {
    pub number: usize,
    pub total: usize,
    pub step: &'a Step,
    pub resource: Option<&'a ResolvedResource>,
}

impl fmt::Display for StepView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# Step {} of {}: {}",
            self.number, self.total, self.step.title
        )?;
        writeln!(f)?;
        if !self.step.content.is_empty() {
            writeln!(f, "{}", self.step.content)?;
            writeln!(f)?;
        }
        if let Some(resource) = self.resource {
            writeln!(f, "## Resource")?;
            writeln!(f)?;
            write!(f, "{resource}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reward;

    #[test]
    fn test_plan_lists_numbered_step_titles() {
        let plan = Plan {
            id: 4,
            title: "Photosynthesis".to_string(),
            content_md: "Overview first.\n1. Light\nabc\n5. Sugar\ndef".to_string(),
            created_at: None,
        };

        let output = plan.to_string();

        assert!(output.starts_with("# 4. Photosynthesis\n"));
        assert!(output.contains("Overview first."));
        assert!(output.contains("1. Light\n2. Sugar\n"));
        assert!(!output.contains("Created"));
    }

    #[test]
    fn test_plan_without_steps() {
        let plan = Plan {
            id: 1,
            title: "Empty".to_string(),
            content_md: "just prose".to_string(),
            created_at: None,
        };
        assert!(plan.to_string().contains("No steps in this plan."));
    }

    #[test]
    fn test_resource_embed_display() {
        let video = ResolvedResource::Url("https://youtu.be/abc".to_string());
        assert!(video
            .to_string()
            .contains("https://www.youtube.com/embed/abc"));

        let page = ResolvedResource::Url("https://doc.rust-lang.org".to_string());
        assert!(page.to_string().contains("Open in your browser"));

        let text = ResolvedResource::Text("**Read** this".to_string());
        assert_eq!(text.to_string(), "**Read** this\n");

        assert_eq!(
            ResolvedResource::None.to_string(),
            "No resource available for this step.\n"
        );
    }

    #[test]
    fn test_quiz_options_are_numbered() {
        let quiz = QuizData {
            question: "Pick one".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            answer_index: 0,
            hint: String::new(),
        };
        assert_eq!(quiz.to_string(), "**Pick one**\n\n1. a\n2. b\n");
    }

    #[test]
    fn test_feedback_shows_total() {
        let feedback = AnswerFeedback::correct(
            1,
            Some(Reward {
                points: Some(3),
                kudos: None,
                total_points: Some(30),
            }),
        );
        let output = feedback.to_string();
        assert!(output.contains("You earned 3 XP!"));
        assert!(output.contains("Total XP: 30"));
    }

    #[test]
    fn test_step_view() {
        let step = Step::new("Light", "Plants absorb light.");
        let resource = ResolvedResource::None;
        let view = StepView {
            number: 2,
            total: 3,
            step: &step,
            resource: Some(&resource),
        };

        let output = view.to_string();

        assert!(output.starts_with("# Step 2 of 3: Light\n"));
        assert!(output.contains("## Resource"));
    }
}
