use crate::advisor::{Message, MessageContent, Profile, RecommendationResult, Speaker};
use console::{Style, measure_text_width, style};

fn terminal_width() -> usize {
    let term = console::Term::stdout();
    let terminal_width = term.size().1 as usize;
    std::cmp::min(terminal_width.saturating_sub(4), 100).max(50)
}

/// Wraps `text` at word boundaries so no line is wider than `max_width` columns.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                measure_text_width(word)
            } else {
                measure_text_width(&current) + 1 + measure_text_width(word)
            };
            if needed > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}

fn indent(lines: Vec<String>, prefix: &str) -> String {
    lines
        .into_iter()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints one conversation entry the way it appears in the chat transcript.
pub fn display_message(message: &Message) {
    let width = terminal_width();

    match message.speaker {
        Speaker::Model => println!("\n{}", style("🤖 SmartCareer").bold().magenta()),
        Speaker::User => println!("\n{}", style("🧑 You").bold().cyan()),
    }

    match &message.content {
        MessageContent::Text(text) if message.speaker == Speaker::Model && looks_like_markdown(text) => {
            display_markdown(text);
        }
        MessageContent::Text(text) => {
            println!("{}", indent(wrap_text(text, width - 2), "  "));
        }
        MessageContent::Recommendation(result) => {
            println!("{}", format_recommendation(result, width));
        }
        MessageContent::Error(text) => {
            let lines = wrap_text(text, width - 5);
            println!("{}", style(indent(lines, "  ⚠️ ")).red());
        }
        MessageContent::Pending(text) => {
            println!("  {}", style(format!("⏳ {}", text)).dim().italic());
        }
    }
}

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```")
        || text.contains("**")
        || text.contains('`')
        || text.lines().any(|l| {
            let l = l.trim_start();
            l.starts_with('#') || l.starts_with("- ") || l.starts_with("* ")
        })
}

/// Renders a markdown reply with termimad.
pub fn display_markdown(text: &str) {
    let skin = termimad::MadSkin::default();
    skin.print_text(text);
}

/// Formats recommendations as three sections: career paths, universities, motivation.
pub fn format_recommendation(result: &RecommendationResult, width: usize) -> String {
    let mut out = Vec::new();
    let heading = Style::new().bold().underlined().yellow();

    out.push(format!("  {}", heading.apply_to("Recommended Career Paths")));
    for (index, path) in result.career_paths.iter().enumerate() {
        out.push(String::new());
        out.push(format!(
            "  {} {}",
            style(format!("{}.", index + 1)).bold().green(),
            style(&path.title).bold()
        ));
        out.push(indent(
            wrap_text(&path.description, width.saturating_sub(5)),
            "     ",
        ));
        if !path.courses.is_empty() {
            out.push(format!("     {}", style("Suggested courses:").dim()));
            for course in &path.courses {
                out.push(format!("       • {}", course));
            }
        }
    }

    out.push(String::new());
    out.push(format!("  {}", heading.apply_to("Suggested Universities")));
    let name_width = result
        .universities
        .iter()
        .map(|u| measure_text_width(&u.name))
        .max()
        .unwrap_or(0)
        .max(4);
    let location_width = result
        .universities
        .iter()
        .map(|u| measure_text_width(&u.location))
        .max()
        .unwrap_or(0)
        .max(8);
    out.push(format!(
        "  {}",
        style(format!(
            "{:<nw$}  {:<lw$}  {}",
            "Name",
            "Location",
            "Type",
            nw = name_width,
            lw = location_width
        ))
        .bold()
    ));
    for university in &result.universities {
        out.push(format!(
            "  {}{}  {}{}  {}",
            university.name,
            " ".repeat(name_width - measure_text_width(&university.name)),
            university.location,
            " ".repeat(location_width - measure_text_width(&university.location)),
            university_type_style(&university.kind).apply_to(&university.kind)
        ));
    }

    out.push(String::new());
    out.push(format!("  {}", heading.apply_to("A Word of Motivation")));
    let motivation = wrap_text(&result.motivation, width.saturating_sub(5));
    out.push(style(indent(motivation, "  ✨ ")).italic().to_string());

    out.join("\n")
}

fn university_type_style(kind: &str) -> Style {
    match kind.trim().to_lowercase().as_str() {
        "federal" => Style::new().green(),
        "state" => Style::new().blue(),
        _ => Style::new().magenta(),
    }
}

/// Formats a numbered option list, marking the current selection.
pub fn format_options(title: &str, options: &[&str], selected: &[String]) -> String {
    let mut out = vec![format!("\n{}", style(title).bold())];
    for (index, option) in options.iter().enumerate() {
        let is_selected = selected.iter().any(|s| s == option);
        let marker = if is_selected {
            style("[x]").green().bold()
        } else {
            style("[ ]").dim()
        };
        out.push(format!("  {:>2}. {} {}", index + 1, marker, option));
    }
    out.join("\n")
}

pub fn display_options(title: &str, options: &[&str], selected: &[String]) {
    println!("{}", format_options(title, options, selected));
}

pub fn display_hint(text: &str) {
    println!("{}", style(text).dim());
}

pub fn display_error(text: &str) {
    eprintln!("{} {}", style("✗").bold().red(), style(text).red());
}

/// Summary of the submitted answers, used by the `/profile` command.
pub fn format_profile(profile: &Profile) -> String {
    let field = |name: &str, value: String| {
        format!(
            "  {:<10} {}",
            style(name).bold(),
            if value.is_empty() {
                style("(not set)".to_string()).dim().to_string()
            } else {
                value
            }
        )
    };
    [
        style("Your answers").bold().underlined().to_string(),
        field("Subjects", profile.subjects.join(", ")),
        field("Interests", profile.interests.join(", ")),
        field("Budget", profile.budget.clone()),
    ]
    .join("\n")
}
