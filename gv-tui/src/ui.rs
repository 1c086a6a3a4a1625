//! UI rendering

use crate::app::App;
use gv_core::{Outline, Selection, VisualLine, APPEND_MARKER};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Size of the outline text area for a terminal of the given size.
/// One row goes to the status bar and the border takes a cell on each side.
pub fn editor_viewport(width: u16, height: u16) -> (usize, usize) {
    (
        width.saturating_sub(2) as usize,
        height.saturating_sub(3).max(1) as usize,
    )
}

/// Draw the UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Outline
            Constraint::Length(1), // Status bar / prompt
        ])
        .split(frame.area());

    render_outline(frame, app, chunks[0]);

    if app.prompt.is_some() {
        render_prompt(frame, app, chunks[1]);
    } else {
        render_status_bar(frame, app, chunks[1]);
    }

    if app.show_help {
        render_help(frame, app);
    }
}

fn render_outline(frame: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let outline = session.outline();

    let dirty = if session.is_dirty() { " *" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(Span::styled(
            format!(" {}{} ", outline.title, dirty),
            app.theme.title,
        ));
    let inner = block.inner(area);

    let lines: Vec<Line> = session
        .visible_lines()
        .iter()
        .map(|line| render_line(app, outline, line, session.selection()))
        .collect();

    frame.render_widget(Paragraph::new(lines).style(app.theme.base).block(block), area);

    if app.prompt.is_none() && !app.show_help {
        let row = session.cursor_line().saturating_sub(session.top_line());
        let x = inner.x + (session.cursor_column() as u16).min(inner.width.saturating_sub(1));
        let y = inner.y + (row as u16).min(inner.height.saturating_sub(1));
        frame.set_cursor_position((x, y));
    }
}

fn render_line<'a>(
    app: &App,
    outline: &Outline,
    line: &VisualLine,
    selection: Option<&Selection>,
) -> Line<'a> {
    let mut spans = vec![Span::raw(" ".repeat(line.indent))];
    match line.bullet {
        Some(bullet) => {
            let pad = line.hanging_indent.saturating_sub(line.indent + 1);
            spans.push(Span::styled(bullet.to_string(), app.theme.bullet));
            spans.push(Span::raw(" ".repeat(pad)));
        }
        None => spans.push(Span::raw(" ".repeat(line.hanging_indent - line.indent))),
    }

    let is_list_title = outline.multi_list && outline.level(line.headline) == 0;
    let text_style = if is_list_title {
        app.theme.list_title
    } else {
        app.theme.base
    };

    // Group characters into runs of selected / unselected text
    let buffer = outline.headline(line.headline).buffer();
    let mut run = String::new();
    let mut run_selected = false;
    for (i, c) in buffer.slice(line.start, line.end()).chars().enumerate() {
        if c == APPEND_MARKER {
            continue;
        }
        let selected = selection.is_some_and(|s| s.contains(line.headline, line.start + i));
        if selected != run_selected && !run.is_empty() {
            spans.push(styled_run(app, std::mem::take(&mut run), run_selected, text_style));
        }
        run_selected = selected;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(styled_run(app, run, run_selected, text_style));
    }

    Line::from(spans)
}

fn styled_run<'a>(app: &App, text: String, selected: bool, style: Style) -> Span<'a> {
    if selected {
        Span::styled(text, app.theme.selection)
    } else {
        Span::styled(text, style)
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let filename = session
        .path()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("untitled");

    let (headline, offset) = session.cursor();
    let selection_str = match session.selection() {
        Some(sel) if !sel.is_empty() => format!(" ({} chars)", sel.len()),
        _ => String::new(),
    };
    let dirty_str = if session.is_dirty() { "  [MODIFIED]" } else { "" };
    let message = app
        .status_message
        .as_deref()
        .map(|m| format!("  {}", m))
        .unwrap_or_default();

    let status_text = format!(
        " gv  {}  {} headlines  line {}/{}  #{}:{}{}{}{}   F1 help",
        filename,
        session.outline().len(),
        session.cursor_line() + 1,
        session.layout().len(),
        headline,
        offset,
        selection_str,
        dirty_str,
        message,
    );

    let status = Paragraph::new(Line::from(vec![Span::styled(
        status_text,
        Style::default()
            .fg(app.theme.status_bar_fg)
            .bg(app.theme.status_bar_bg)
            .add_modifier(Modifier::BOLD),
    )]));

    frame.render_widget(status, area);
}

fn render_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let Some(prompt) = &app.prompt else {
        return;
    };
    let value = prompt.value();
    let line = Line::from(vec![
        Span::styled(prompt.label.clone(), app.theme.prompt),
        Span::styled(value.clone(), app.theme.base),
    ]);
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(line), area);

    let typed: String = value.chars().take(prompt.cursor()).collect();
    let x = area.x + (prompt.label.width() + typed.width()) as u16;
    frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
}

const HELP: &[(&str, &str)] = &[
    ("Arrows", "Move cursor"),
    ("Shift+Arrows", "Extend selection"),
    ("Home / End", "Start / end of headline"),
    ("PgUp / PgDn", "Scroll a page"),
    ("Ctrl+Down / Up", "Expand / collapse"),
    ("Enter", "Split headline"),
    ("Backspace / Del", "Delete, join at edges"),
    ("Ctrl+Del", "Delete headline"),
    ("Tab / Shift+Tab", "Indent / outdent"),
    ("Ctrl+B", "Toggle bullets"),
    ("Ctrl+L", "Toggle multi-list"),
    ("Ctrl+C / X / V", "Copy / cut / paste"),
    ("Ctrl+S", "Save"),
    ("Ctrl+T", "Edit title"),
    ("Ctrl+N", "New outline"),
    ("Esc", "Clear selection"),
    ("Ctrl+Q", "Quit"),
];

/// Centered overlay listing the keybindings
fn render_help(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let width = 46u16.min(area.width.saturating_sub(4));
    let height = (HELP.len() as u16 + 4).min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let help_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, help_area);

    let mut lines = vec![Line::from("")];
    lines.extend(HELP.iter().map(|(keys, what)| {
        Line::from(vec![
            Span::styled(format!("  {:<18}", keys), app.theme.help_key),
            Span::raw(*what),
        ])
    }));
    lines.push(Line::from(""));

    let help = Paragraph::new(lines).style(app.theme.base).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border))
            .title(Span::styled(" Keybindings (any key closes) ", app.theme.title)),
    );
    frame.render_widget(help, help_area);
}
