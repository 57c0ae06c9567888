//! Layout Engine: turns a normalized `ResumeRecord` into an ordered draw-operation plan.
//!
//! # Traversal order (fixed)
//! 1. Header: centered name line, then email, phone, address
//! 2. Blank line
//! 3. Education: header, then per entry institution / degree / start / end + blank line
//! 4. Experience: header, then per entry company / role / start / end / description + blank line
//! 5. Skills: header, then one line per skill (no blank lines between)
//! 6. Blank line, Projects: header, then per entry title / description / link + blank line
//!
//! Every printed line goes through the page cursor. When the cursor reports a
//! break, a `PageBreak` is emitted immediately before the line it was reported for.
//! Blank lines never break, so every page starts with a written line.

use tracing::debug;

use crate::layout::cursor::{line_height, LayoutError, PageCursor};
use crate::layout::font_metrics::{get_metrics, FontMetricTable, PageConfig};
use crate::layout::operations::{Align, DrawOperation};
use crate::layout::wrap::wrap_text;
use crate::models::resume::ResumeRecord;

pub const NAME_FONT_SIZE: f32 = 20.0;
pub const SECTION_FONT_SIZE: f32 = 16.0;
pub const BODY_FONT_SIZE: f32 = 14.0;

/// The complete output of a layout run.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub operations: Vec<DrawOperation>,
    /// Number of pages the plan spans (1 + number of `PageBreak`s).
    pub page_count: usize,
}

impl LayoutPlan {
    pub fn page_breaks(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, DrawOperation::PageBreak))
            .count()
    }
}

/// Lays out `record` on pages described by `config`.
///
/// Deterministic: the same record and config always produce the same plan.
pub fn layout_resume(record: &ResumeRecord, config: &PageConfig) -> Result<LayoutPlan, LayoutError> {
    let mut engine = LayoutEngine::new(config)?;

    // Header block
    engine.write(&format!("Resume: {}", record.name), NAME_FONT_SIZE, Align::Center)?;
    engine.field("Email", &record.email)?;
    engine.field("Phone", &record.phone)?;
    engine.field("Address", &record.address)?;
    engine.blank_line()?;

    engine.section("Education")?;
    for edu in &record.education {
        engine.field("Institution", &edu.institution)?;
        engine.field("Degree", &edu.degree)?;
        engine.field("Start Date", &edu.start_date)?;
        engine.field("End Date", &edu.end_date)?;
        engine.blank_line()?;
    }

    engine.section("Experience")?;
    for exp in &record.experience {
        engine.field("Company", &exp.company)?;
        engine.field("Role", &exp.role)?;
        engine.field("Start Date", &exp.start_date)?;
        engine.field("End Date", &exp.end_date)?;
        engine.field("Description", &exp.description)?;
        engine.blank_line()?;
    }

    engine.section("Skills")?;
    for skill in &record.skills {
        engine.write(skill, BODY_FONT_SIZE, Align::Left)?;
    }

    engine.blank_line()?;
    engine.section("Projects")?;
    for project in &record.projects {
        engine.field("Title", &project.title)?;
        engine.field("Description", &project.description)?;
        engine.field("Link", &project.link)?;
        engine.blank_line()?;
    }

    Ok(engine.finish())
}

// ────────────────────────────────────────────────────────────────────────────
// Engine state
// ────────────────────────────────────────────────────────────────────────────

struct LayoutEngine {
    cursor: PageCursor,
    operations: Vec<DrawOperation>,
    /// Last font size emitted; `SetFontSize` is only emitted on change.
    font_size: Option<f32>,
    metrics: &'static FontMetricTable,
}

impl LayoutEngine {
    fn new(config: &PageConfig) -> Result<Self, LayoutError> {
        Ok(Self {
            cursor: PageCursor::new(config.content_height(), config.content_width())?,
            operations: Vec::new(),
            font_size: None,
            metrics: get_metrics(),
        })
    }

    fn section(&mut self, title: &str) -> Result<(), LayoutError> {
        self.write(title, SECTION_FONT_SIZE, Align::Left)
    }

    fn field(&mut self, label: &str, value: &str) -> Result<(), LayoutError> {
        self.write(&format!("{label}: {value}"), BODY_FONT_SIZE, Align::Left)
    }

    /// Writes one logical line, wrapped to the content width.
    fn write(&mut self, text: &str, font_size: f32, align: Align) -> Result<(), LayoutError> {
        self.set_font_size(font_size);

        let lines = wrap_text(text, font_size, self.cursor.page_width(), self.metrics);
        for line in lines {
            let advance = self.cursor.request_line(font_size)?;
            if advance.page_break_triggered {
                self.page_break();
            }
            self.operations.push(DrawOperation::WriteLine { text: line, align });
        }
        Ok(())
    }

    /// One "move down" unit: a body line height of empty space.
    ///
    /// Never breaks on its own; at the page bottom the space is dropped and the
    /// next written line starts the new page.
    fn blank_line(&mut self) -> Result<(), LayoutError> {
        let amount = self.cursor.consume_space(line_height(BODY_FONT_SIZE))?;
        if amount > 0.0 {
            self.operations.push(DrawOperation::AdvanceCursor { amount });
        }
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) {
        if self.font_size != Some(size) {
            self.font_size = Some(size);
            self.operations.push(DrawOperation::SetFontSize { size });
        }
    }

    fn page_break(&mut self) {
        debug!(page = self.cursor.page_index(), "Layout: starting new page");
        self.operations.push(DrawOperation::PageBreak);
    }

    fn finish(self) -> LayoutPlan {
        LayoutPlan {
            page_count: self.cursor.page_count(),
            operations: self.operations,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{default_page_config, PageFormat};
    use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry};

    fn make_config() -> PageConfig {
        default_page_config(PageFormat::Letter)
    }

    fn lines(plan: &LayoutPlan) -> Vec<&str> {
        plan.operations.iter().filter_map(|op| op.line_text()).collect()
    }

    fn make_education(i: usize) -> EducationEntry {
        EducationEntry {
            institution: format!("School {i}"),
            degree: "BSc".to_string(),
            start_date: format!("20{i:02}"),
            end_date: format!("20{:02}", i + 4),
        }
    }

    // ── scenarios ───────────────────────────────────────────────────────────

    #[test]
    fn test_single_skill_fits_on_one_page() {
        let record = ResumeRecord {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            skills: vec!["Go".to_string()],
            ..Default::default()
        };

        let plan = layout_resume(&record, &make_config()).unwrap();
        let texts = lines(&plan);

        assert_eq!(texts.iter().filter(|t| **t == "Skills").count(), 1);
        assert_eq!(texts.iter().filter(|t| **t == "Go").count(), 1);
        let skills_at = texts.iter().position(|t| *t == "Skills").unwrap();
        assert_eq!(texts[skills_at + 1], "Go");
        assert_eq!(plan.page_breaks(), 0);
        assert_eq!(plan.page_count, 1);
    }

    #[test]
    fn test_header_lines_carry_labels() {
        let record = ResumeRecord {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "London".to_string(),
            ..Default::default()
        };

        let plan = layout_resume(&record, &make_config()).unwrap();
        assert_eq!(
            plan.operations[..5],
            [
                DrawOperation::SetFontSize { size: NAME_FONT_SIZE },
                DrawOperation::WriteLine {
                    text: "Resume: Ada Lovelace".to_string(),
                    align: Align::Center,
                },
                DrawOperation::SetFontSize { size: BODY_FONT_SIZE },
                DrawOperation::WriteLine {
                    text: "Email: ada@example.com".to_string(),
                    align: Align::Left,
                },
                DrawOperation::WriteLine {
                    text: "Phone: 555-0100".to_string(),
                    align: Align::Left,
                },
            ]
        );
    }

    #[test]
    fn test_sections_in_order_with_no_entries() {
        let plan = layout_resume(&ResumeRecord::default(), &make_config()).unwrap();
        let texts = lines(&plan);

        assert_eq!(
            texts,
            vec![
                "Resume:",
                "Email:",
                "Phone:",
                "Address:",
                "Education",
                "Experience",
                "Skills",
                "Projects",
            ]
        );
        assert_eq!(plan.page_count, 1);
    }

    #[test]
    fn test_sections_in_order_with_entries() {
        let record = ResumeRecord {
            education: vec![make_education(1)],
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                ..Default::default()
            }],
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            projects: vec![ProjectEntry {
                title: "Templating".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let plan = layout_resume(&record, &make_config()).unwrap();
        let texts = lines(&plan);
        let at = |s: &str| texts.iter().position(|t| *t == s).unwrap();

        assert!(at("Education") < at("Institution: School 1"));
        assert!(at("Institution: School 1") < at("Experience"));
        assert!(at("Experience") < at("Company: Acme"));
        assert!(at("Company: Acme") < at("Skills"));
        assert_eq!(at("Skills") + 1, at("Rust"));
        assert_eq!(at("Rust") + 1, at("SQL"));
        assert!(at("SQL") < at("Projects"));
        assert!(at("Projects") < at("Title: Templating"));
    }

    #[test]
    fn test_all_empty_entries_still_emitted() {
        let record = ResumeRecord {
            education: vec![EducationEntry::default(), EducationEntry::default()],
            ..Default::default()
        };

        let plan = layout_resume(&record, &make_config()).unwrap();
        let texts = lines(&plan);
        assert_eq!(texts.iter().filter(|t| **t == "Institution:").count(), 2);
        assert_eq!(texts.iter().filter(|t| **t == "End Date:").count(), 2);
    }

    #[test]
    fn test_education_overflow_breaks_before_crossing_line() {
        // Letter content height is 648pt. Header + blank + "Education" take 110.4pt,
        // each entry 84pt, so the 7th entry's third line is the first that does not fit.
        let record = ResumeRecord {
            education: (0..12).map(make_education).collect(),
            ..Default::default()
        };

        let plan = layout_resume(&record, &make_config()).unwrap();
        let first_break = plan
            .operations
            .iter()
            .position(|op| matches!(op, DrawOperation::PageBreak))
            .expect("overflowing education list must break");

        assert_eq!(
            plan.operations[first_break + 1].line_text(),
            Some("Start Date: 2006")
        );
        assert_eq!(plan.page_count, plan.page_breaks() + 1);
        assert!(plan.page_count >= 2);
    }

    #[test]
    fn test_every_page_break_precedes_content() {
        let record = ResumeRecord {
            education: (0..30).map(make_education).collect(),
            skills: (0..80).map(|i| format!("Skill {i}")).collect(),
            ..Default::default()
        };

        let plan = layout_resume(&record, &make_config()).unwrap();
        assert!(plan.page_breaks() > 2);
        assert_breaks_lead_into_lines(&plan);
    }

    fn assert_breaks_lead_into_lines(plan: &LayoutPlan) {
        for (i, op) in plan.operations.iter().enumerate() {
            if matches!(op, DrawOperation::PageBreak) {
                assert!(
                    matches!(
                        plan.operations.get(i + 1),
                        Some(DrawOperation::WriteLine { .. })
                    ),
                    "page break at {i} is not followed by a written line: {:?}",
                    plan.operations.get(i + 1)
                );
            }
        }
    }

    #[test]
    fn test_trailing_blank_line_never_adds_a_page() {
        // Sweeps the skill count so the final blank line lands on every
        // position relative to the page bottom, including just past it.
        let config = make_config();
        for n in 0..80 {
            let record = ResumeRecord {
                skills: (0..n).map(|i| format!("Skill {i}")).collect(),
                projects: vec![ProjectEntry::default()],
                ..Default::default()
            };

            let plan = layout_resume(&record, &config).unwrap();
            let tail = &plan.operations[plan.operations.len().saturating_sub(2)..];
            assert!(
                !matches!(tail.first(), Some(DrawOperation::PageBreak)),
                "skills={n}: plan ends in a break, tail {tail:?}"
            );
            assert!(!matches!(plan.operations.last(), Some(DrawOperation::PageBreak)));
            assert_breaks_lead_into_lines(&plan);
            assert_eq!(plan.page_count, plan.page_breaks() + 1);
        }
    }

    #[test]
    fn test_blank_line_at_page_bottom_is_truncated() {
        // With 24 skills the project's "Link:" line ends 9.6pt above the bottom
        // of the first page, so the closing blank line is cut to fit.
        let record = ResumeRecord {
            skills: (0..24).map(|i| format!("Skill {i}")).collect(),
            projects: vec![ProjectEntry::default()],
            ..Default::default()
        };

        let plan = layout_resume(&record, &make_config()).unwrap();
        assert_eq!(plan.page_count, 1);
        assert_eq!(plan.page_breaks(), 0);
        match plan.operations.last() {
            Some(DrawOperation::AdvanceCursor { amount }) => {
                assert!((amount - 9.6).abs() < 0.01, "blank line not truncated: {amount}")
            }
            other => panic!("expected a trailing blank line, got {other:?}"),
        }
    }

    // ── font sizes & wrapping ───────────────────────────────────────────────

    #[test]
    fn test_font_size_only_emitted_on_change() {
        let record = ResumeRecord {
            skills: vec!["Go".to_string()],
            ..Default::default()
        };

        let plan = layout_resume(&record, &make_config()).unwrap();
        let sizes: Vec<f32> = plan
            .operations
            .iter()
            .filter_map(|op| match op {
                DrawOperation::SetFontSize { size } => Some(*size),
                _ => None,
            })
            .collect();

        assert_eq!(
            sizes,
            vec![NAME_FONT_SIZE, BODY_FONT_SIZE, SECTION_FONT_SIZE, BODY_FONT_SIZE, SECTION_FONT_SIZE]
        );
    }

    #[test]
    fn test_long_description_wraps_to_several_lines() {
        let record = ResumeRecord {
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                description: "Built and operated the billing pipeline for twelve regions ".repeat(5),
                ..Default::default()
            }],
            ..Default::default()
        };

        let plan = layout_resume(&record, &make_config()).unwrap();
        let texts = lines(&plan);
        let start = texts
            .iter()
            .position(|t| t.starts_with("Description: Built"))
            .unwrap();
        let end = texts.iter().position(|t| *t == "Skills").unwrap();
        assert!(end - start > 1, "description should span several lines");
    }

    #[test]
    fn test_layout_is_deterministic() {
        let record = ResumeRecord {
            name: "A".to_string(),
            education: (0..20).map(make_education).collect(),
            ..Default::default()
        };
        let config = make_config();
        assert_eq!(
            layout_resume(&record, &config).unwrap(),
            layout_resume(&record, &config).unwrap()
        );
    }

    #[test]
    fn test_unusable_geometry_is_layout_error() {
        let mut config = make_config();
        config.margin_pt = 400.0;
        let err = layout_resume(&ResumeRecord::default(), &config).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGeometry { .. }));
    }
}
