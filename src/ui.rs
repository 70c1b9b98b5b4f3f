use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{BranchPicker, Confirmation, KindMenu, format_age};

fn split_with_status(area: Rect) -> (Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)].as_ref())
        .split(area);
    (vertical[0], vertical[1])
}

fn highlight() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD)
}

fn titled(title: String) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
}

fn draw_status(frame: &mut Frame<'_>, area: Rect, help: &str, status: &str) {
    let status_block = Paragraph::new(vec![Line::from(help.to_string()), Line::from(status.to_string())])
        .block(Block::default().title("Status").borders(Borders::ALL));
    frame.render_widget(status_block, area);
}

pub fn draw_kind_menu(frame: &mut Frame<'_>, menu: &KindMenu) {
    let (main, status) = split_with_status(frame.size());

    let mut state = ListState::default();
    state.select(Some(menu.cursor()));

    let items: Vec<ListItem> = menu
        .options()
        .iter()
        .map(|kind| ListItem::new(format!("{} branches", kind.label())))
        .collect();

    let list = List::new(items)
        .block(titled("Which branches do you want to manage?".to_string()))
        .highlight_style(highlight())
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, main, &mut state);
    draw_status(
        frame,
        status,
        "up/down or j/k: move  enter: choose  q: cancel",
        "Choose a branch type.",
    );
}

pub fn draw_picker(frame: &mut Frame<'_>, picker: &BranchPicker) {
    let (main, status) = split_with_status(frame.size());

    let mut state = ListState::default();
    if !picker.is_empty() {
        state.select(Some(picker.cursor()));
    }

    let list_items: Vec<ListItem> = picker
        .items()
        .iter()
        .map(|branch| {
            let marker = if branch.selected { "[x]" } else { "[ ]" };
            let mut spans = vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::styled(branch.entry.name.as_str(), Style::default().fg(Color::Yellow)),
            ];
            if let Some(age) = branch.age {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("{} ago", format_age(age)),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if let Some(summary) = branch
                .entry
                .detail
                .as_ref()
                .and_then(|detail| detail.summary.as_deref())
            {
                spans.push(Span::raw("  "));
                spans.push(Span::raw(summary));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(
        "Delete {} branches - {} / {} selected",
        picker.kind(),
        picker.selected_count(),
        picker.total_count()
    );

    let list = List::new(list_items)
        .block(titled(title))
        .highlight_style(highlight())
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, main, &mut state);

    let status_line = picker.message().unwrap_or("Select branches to delete.");
    draw_status(
        frame,
        status,
        "up/down or j/k: move  space: toggle  a: toggle all  enter: confirm  q: cancel",
        status_line,
    );
}

pub fn draw_confirmation(frame: &mut Frame<'_>, confirmation: &Confirmation) {
    let (main, status) = split_with_status(frame.size());

    let mut lines: Vec<Line> = confirmation
        .branches()
        .iter()
        .map(|name| Line::from(format!("  - {name}")))
        .collect();
    lines.push(Line::from(""));

    let (yes_style, no_style) = if confirmation.highlighted_yes() {
        (highlight(), Style::default())
    } else {
        (Style::default(), highlight())
    };
    lines.push(Line::from(vec![
        Span::styled(" Yes ", yes_style),
        Span::raw("   "),
        Span::styled(" No ", no_style),
    ]));

    let body = Paragraph::new(lines).block(titled(confirmation.question()));
    frame.render_widget(body, main);

    draw_status(
        frame,
        status,
        "y: yes  n: no  left/right: switch  enter: answer",
        "Deleted branches cannot be restored from here.",
    );
}
