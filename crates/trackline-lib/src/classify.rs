//! Work-stream classification.
//!
//! Maps a raw issue to a work-stream label (BE/FE/Plan/Design/QA/PM) from its
//! assignee, category and tracker text, in that strict precedence order.
//! Personnel rosters are ground truth for team ownership, so an assignee match
//! always wins over conflicting category or tracker text.

use std::fmt;
use std::str::FromStr;

use crate::model::Issue;

/// Front-end team roster. Matched by substring against the assignee name so
/// tracker-side aliases ("FE_VAnh (Henry)") still resolve.
const FE_MEMBERS: &[&str] = &[
    "FE_CVThanh",
    "FE_DVHuy",
    "FE_PTVang",
    "FE_TDAnh",
    "FE_VAnh (Henry)",
    "전현지",
    "여찬규",
    "김정범",
    "신희진",
    "이예나(Nancy)",
];

/// Back-end team roster.
const BE_MEMBERS: &[&str] = &[
    "이자련(ryeon)",
    "이경환 (Riss)",
    "염종환(Lucas)",
    "선혁(Ronnie)",
    "배준(JUN)",
    "민광철(Richie)",
    "김상희(sony)",
];

/// Members who split between planning and design work; the category/subject
/// design marker decides which.
const PLAN_DESIGN_MEMBERS: &[&str] = &["박재경(Jen)", "라경연"];

/// Work-stream label derived from an issue. Not stored anywhere; recomputed
/// on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkStream {
    Be,
    Fe,
    Plan,
    Design,
    Qa,
    Pm,
    /// No roster, category or tracker marker matched.
    #[default]
    Unassigned,
}

impl WorkStream {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Be => "BE",
            Self::Fe => "FE",
            Self::Plan => "Plan",
            Self::Design => "Design",
            Self::Qa => "QA",
            Self::Pm => "PM",
            Self::Unassigned => "",
        }
    }

    /// The five streams a user can toggle on the board. PM and unclassified
    /// issues sit outside the toggle set.
    pub const TOGGLEABLE: [Self; 5] = [Self::Be, Self::Fe, Self::Plan, Self::Design, Self::Qa];
}

impl fmt::Display for WorkStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkStream {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "be" => Ok(Self::Be),
            "fe" => Ok(Self::Fe),
            "plan" => Ok(Self::Plan),
            "design" => Ok(Self::Design),
            "qa" => Ok(Self::Qa),
            "pm" => Ok(Self::Pm),
            other => Err(format!("unknown work stream: {other}")),
        }
    }
}

/// Classify an issue into a work stream. Total and pure: every issue maps to
/// exactly one label and the same issue always maps to the same label.
#[must_use]
pub fn classify(issue: &Issue) -> WorkStream {
    let assignee = issue.assignee_name();
    let category = issue.category_name();
    let subject = issue.subject.as_str();

    // 1. Assignee roster lookup.
    if FE_MEMBERS.iter().any(|m| assignee.contains(m)) {
        return WorkStream::Fe;
    }
    if BE_MEMBERS.iter().any(|m| assignee.contains(m)) {
        return WorkStream::Be;
    }
    if PLAN_DESIGN_MEMBERS.iter().any(|m| assignee.contains(m)) {
        if category.contains("디자인") || subject.contains("Design") {
            return WorkStream::Design;
        }
        return WorkStream::Plan;
    }

    // 2. Category text.
    let category_lower = category.to_lowercase();
    if category_lower.contains("front") || category.contains("FE") {
        return WorkStream::Fe;
    }
    if category_lower.contains("back") || category.contains("BE") {
        return WorkStream::Be;
    }
    if category_lower.contains("design") || category.contains("디자인") {
        return WorkStream::Design;
    }
    if category_lower.contains("plan") || category.contains("기획") {
        return WorkStream::Plan;
    }
    if category_lower.contains("qa") || category.contains("검증") {
        return WorkStream::Qa;
    }
    if category_lower.contains("pm") || category.contains("관리") {
        return WorkStream::Pm;
    }

    // 3. Tracker text, strict PM identification only.
    if issue.tracker.name.to_lowercase().contains("pm") {
        return WorkStream::Pm;
    }

    WorkStream::Unassigned
}

/// Categorical tone of a status name, for glyph selection in the renderer.
///
/// Distilled from the status text matching the board uses; the tracker's
/// statuses carry bilingual names ("진행(Doing)"), so both forms match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    New,
    Doing,
    Resolved,
    Success,
    Fail,
    Feedback,
    Hold,
    Other,
}

impl StatusTone {
    #[must_use]
    pub fn from_name(status_name: &str) -> Self {
        let s = status_name.to_lowercase();
        if s.contains("신규") || s.contains("new") {
            return Self::New;
        }
        if s.contains("진행") || s.contains("doing") {
            return Self::Doing;
        }
        if s.contains("해결") || s.contains("complete") || s.contains("resolved") {
            return Self::Resolved;
        }
        if s.contains("완료성공") || s.contains("success") {
            return Self::Success;
        }
        if s.contains("완료실패") || s.contains("fail") {
            return Self::Fail;
        }
        if s.contains("피드백") || s.contains("feedback") {
            return Self::Feedback;
        }
        if s.contains("보류") || s.contains("pause") || s.contains("hold") {
            return Self::Hold;
        }
        Self::Other
    }
}
