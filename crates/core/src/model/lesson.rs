use crate::model::ids::LessonId;

/// Worked example attached to a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseStudy {
    pub character: &'static str,
    pub scenario: &'static str,
    pub lesson: &'static str,
}

/// One curriculum module. Defined at build time, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonRecord {
    pub id: LessonId,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub objective: &'static str,
    pub xp: u32,
    pub points: &'static [&'static str],
    pub case_study: CaseStudy,
    pub gold_tip: &'static str,
}

impl LessonRecord {
    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    /// XP granted the first time this module is completed.
    #[must_use]
    pub fn xp_reward(&self) -> u32 {
        self.xp
    }
}
