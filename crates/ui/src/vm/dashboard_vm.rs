use academy_core::model::{BadgeStatus, LessonId, evaluate_badges};
use services::SessionSnapshot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeCardVm {
    pub name: &'static str,
    pub slug: &'static str,
    pub threshold: u32,
    pub unlocked: bool,
}

impl BadgeCardVm {
    #[must_use]
    pub fn css_class(&self) -> String {
        let state = if self.unlocked { "unlocked" } else { "locked" };
        format!("badge badge-{} badge-{state}", self.slug)
    }
}

impl From<BadgeStatus> for BadgeCardVm {
    fn from(status: BadgeStatus) -> Self {
        Self {
            name: status.kind.name(),
            slug: status.kind.slug(),
            threshold: status.kind.threshold(),
            unlocked: status.unlocked,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub id: LessonId,
    pub module_label: String,
    pub title: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub name: String,
    pub initial: String,
    pub photo: Option<String>,
    pub xp: u32,
    pub percent_ready: u8,
    pub up_next: Option<&'static str>,
    pub course_complete: bool,
    pub quiz_in_progress: bool,
    pub certified: bool,
    pub badges: Vec<BadgeCardVm>,
    pub review: Vec<ReviewItemVm>,
}

impl DashboardVm {
    /// Heading of the path card once every lesson is done.
    #[must_use]
    pub fn exam_heading(&self) -> &'static str {
        if self.quiz_in_progress {
            "Finish Your Exam"
        } else {
            "Curriculum Complete!"
        }
    }

    #[must_use]
    pub fn exam_button_label(&self) -> &'static str {
        if self.quiz_in_progress {
            "Resume Quiz"
        } else {
            "Take Final Exam"
        }
    }

    #[must_use]
    pub fn xp_label(&self) -> String {
        format!("{} XP", self.xp)
    }
}

#[must_use]
pub fn map_dashboard(snapshot: &SessionSnapshot) -> DashboardVm {
    let curriculum = snapshot.curriculum;
    let progress = &snapshot.progress;
    let lesson_count = curriculum.lesson_count();
    let course_complete = progress.is_course_complete(lesson_count);

    let name = snapshot
        .learner
        .as_ref()
        .map(|learner| learner.name.clone())
        .unwrap_or_default();
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();

    let review = curriculum
        .lessons()
        .iter()
        .filter(|lesson| progress.has_completed(lesson.id))
        .map(|lesson| ReviewItemVm {
            id: lesson.id,
            module_label: format!("Module {}", lesson.id),
            title: lesson.title,
        })
        .collect();

    DashboardVm {
        photo: snapshot
            .learner
            .as_ref()
            .and_then(|learner| learner.photo.clone()),
        name,
        initial,
        xp: progress.xp(),
        percent_ready: progress.percent_complete(lesson_count),
        up_next: curriculum
            .lesson_at(progress.current_lesson_index())
            .map(|lesson| lesson.title),
        course_complete,
        quiz_in_progress: course_complete && snapshot.quiz.is_in_progress(),
        certified: progress.quiz_passed(),
        badges: evaluate_badges(progress.xp())
            .into_iter()
            .map(BadgeCardVm::from)
            .collect(),
        review,
    }
}
