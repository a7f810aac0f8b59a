use std::io::Write;

use owo_colors::OwoColorize;
use syllabus_core::{CoTopics, QueryError, QuestionContext, SyllabusSummary};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Print the course header and one line per unit.
pub fn print_summary(
    w: &mut dyn Write,
    summary: &SyllabusSummary,
    color: ColorMode,
) -> std::io::Result<()> {
    let name = or_dash(summary.course_name.as_deref());
    let code = or_dash(summary.course_code.as_deref());
    if color.enabled() {
        writeln!(w, "{} ({})", name.bold(), code.cyan())?;
    } else {
        writeln!(w, "{} ({})", name, code)?;
    }
    writeln!(w, "Department: {}", or_dash(summary.department.as_deref()))?;
    writeln!(w, "Semester:   {}", or_dash(summary.semester.as_deref()))?;
    writeln!(w)?;

    writeln!(w, "{} units", summary.total_units)?;
    for unit in &summary.units {
        let co = unit.course_outcome.as_deref().unwrap_or("no CO");
        if color.enabled() {
            writeln!(
                w,
                "  {:<10} {} ({} periods) [{}]",
                unit.unit_id.bold(),
                unit.title,
                unit.periods,
                co.cyan()
            )?;
        } else {
            writeln!(
                w,
                "  {:<10} {} ({} periods) [{}]",
                unit.unit_id, unit.title, unit.periods, co
            )?;
        }
    }
    writeln!(w)?;

    if summary.available_cos.is_empty() {
        writeln!(w, "No course outcomes are linked to unit topics.")?;
    } else {
        writeln!(w, "Available COs: {}", summary.available_cos.join(", "))?;
    }
    Ok(())
}

/// Print the topic mapping behind one course outcome.
pub fn print_co_topics(w: &mut dyn Write, topics: &CoTopics, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "{} -> {}: {} ({} periods)",
            topics.course_outcome.cyan(),
            topics.unit_id.bold(),
            topics.unit_title,
            topics.periods
        )?;
    } else {
        writeln!(
            w,
            "{} -> {}: {} ({} periods)",
            topics.course_outcome, topics.unit_id, topics.unit_title, topics.periods
        )?;
    }
    for (heading, items) in topics.topics.iter() {
        writeln!(w, "{}:", heading)?;
        for item in items {
            writeln!(w, "  - {}", item)?;
        }
    }
    Ok(())
}

/// Print the generated questions for a request.
pub fn print_answer(
    w: &mut dyn Write,
    context: &QuestionContext,
    answer: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    let header = format!(
        "{} / {}: {} [{}]",
        context.course_outcome, context.unit_id, context.unit_title, context.context.bloom_level
    );
    if color.enabled() {
        writeln!(w, "{}", header.bold())?;
        writeln!(w, "{}", format!("Topics: {}", context.topics_covered.join(", ")).dimmed())?;
    } else {
        writeln!(w, "{}", header)?;
        writeln!(w, "Topics: {}", context.topics_covered.join(", "))?;
    }
    writeln!(w)?;
    writeln!(w, "{}", answer.trim_end())?;
    Ok(())
}

/// Print a query failure, listing the valid CO codes when the lookup missed.
pub fn print_query_error(w: &mut dyn Write, err: &QueryError, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "Error:".red(), err)?;
    } else {
        writeln!(w, "Error: {}", err)?;
    }
    if let QueryError::CoNotFound { available, .. } = err {
        if available.is_empty() {
            writeln!(w, "No course outcomes are linked to unit topics.")?;
        } else {
            writeln!(w, "Available COs: {}", available.join(", "))?;
        }
    }
    Ok(())
}
