//! Rendering of a [`Session`] with ratatui. Stateless: every frame is drawn
//! from the session alone.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use setup_meta::Scope;
use setup_tools::{BatchSummary, EntryAction, InjectionResult};

use crate::app::{Field, MenuItem, Session, View};

const TITLE: &str = "Jira MCP setup";

/// Draw the current view.
pub fn render(frame: &mut Frame, session: &Session) {
    let [header, main, notice, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(format!("{TITLE} · {}", view_title(session.view())))
            .style(Style::default().bold())
            .centered(),
        header,
    );

    match session.view() {
        View::Menu => render_menu(frame, session, main),
        View::MultiSelect => render_multi_select(frame, session, main),
        View::ScopeSelect => render_scope_select(frame, session, main),
        View::Credentials => render_credentials(frame, session, main),
        View::Confirm => render_confirm(frame, session, main),
        View::Installing => render_installing(frame, main),
        View::Results | View::Success | View::Error => render_results(frame, session, main),
    }

    if let Some(message) = session.notice() {
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::Yellow)).centered(),
            notice,
        );
    }

    frame.render_widget(
        Paragraph::new(key_hints(session.view()))
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        footer,
    );
}

fn view_title(view: View) -> &'static str {
    match view {
        View::Menu => "Choose a tool",
        View::MultiSelect => "Select tools",
        View::ScopeSelect => "Choose scope",
        View::Credentials => "Jira credentials",
        View::Confirm => "Confirm",
        View::Installing => "Installing",
        View::Results => "Results",
        View::Success => "Installed",
        View::Error => "Installation failed",
    }
}

fn key_hints(view: View) -> &'static str {
    match view {
        View::Menu => "↑↓ Navigate | Enter Select | q Quit",
        View::MultiSelect => {
            "↑↓ Navigate | Space Toggle | a All | n None | Enter Continue | Esc Back"
        }
        View::ScopeSelect => "↑↓/Space Toggle | Enter Continue | Esc Back",
        View::Credentials => {
            "Tab/↑↓ Switch field | Ctrl-W Delete word | Ctrl-U Clear | Enter Continue | Esc Menu"
        }
        View::Confirm => "y Install | n/Esc Back",
        View::Installing => "",
        View::Results | View::Success | View::Error => "Enter/q Quit",
    }
}

fn highlighted_list<'a>(items: Vec<ListItem<'a>>, title: &'a str) -> List<'a> {
    List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
}

fn detection_marker(installed: bool) -> Span<'static> {
    if installed {
        Span::styled("● ", Style::default().fg(Color::Green))
    } else {
        Span::styled("○ ", Style::default().fg(Color::DarkGray))
    }
}

fn render_menu(frame: &mut Frame, session: &Session, area: Rect) {
    let items: Vec<ListItem> = session
        .menu_items()
        .into_iter()
        .map(|item| match item {
            MenuItem::MultiInstall => ListItem::new(Line::from(vec![
                Span::raw("  "),
                Span::styled("Install to multiple tools", Style::default().bold()),
            ])),
            MenuItem::Target(index) => {
                let target = &session.targets()[index];
                ListItem::new(Line::from(vec![
                    detection_marker(target.installed),
                    Span::raw(target.descriptor.display_name),
                ]))
            }
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(session.menu_cursor()));
    frame.render_stateful_widget(highlighted_list(items, " Tools "), area, &mut state);
}

fn render_multi_select(frame: &mut Frame, session: &Session, area: Rect) {
    let items: Vec<ListItem> = session
        .targets()
        .iter()
        .enumerate()
        .map(|(index, target)| {
            let checkbox = if session.is_selected(index) { "[x] " } else { "[ ] " };
            ListItem::new(Line::from(vec![
                Span::raw(checkbox),
                detection_marker(target.installed),
                Span::raw(target.descriptor.display_name),
            ]))
        })
        .collect();

    let title = format!(" {} selected ", session.selected_count());
    let list =
        highlighted_list(items, "").block(Block::default().borders(Borders::ALL).title(title));
    let mut state = ListState::default().with_selected(Some(session.select_cursor()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_scope_select(frame: &mut Frame, session: &Session, area: Rect) {
    let [choices, support] =
        Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).areas(area);

    let items: Vec<ListItem> = [Scope::Project, Scope::User]
        .into_iter()
        .map(|scope| {
            let description = match scope {
                Scope::Project => "Project (this directory only)",
                Scope::User => "User (all projects)",
            };
            ListItem::new(description)
        })
        .collect();
    let selected = match session.scope() {
        Scope::Project => 0,
        Scope::User => 1,
    };
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(highlighted_list(items, " Scope "), choices, &mut state);

    let lines: Vec<Line> = session
        .chosen_targets()
        .iter()
        .map(|target| {
            if target.supports(session.scope()) {
                Line::from(format!("  {}", target.display_name))
            } else {
                Line::styled(
                    format!("! {} does not support {} scope", target.display_name, session.scope()),
                    Style::default().fg(Color::Yellow),
                )
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Selected tools ")),
        support,
    );
}

fn render_credentials(frame: &mut Frame, session: &Session, area: Rect) {
    let form = session.form();
    let popup = centered_rect(70, area);
    frame.render_widget(Clear, popup);

    let rows: [Rect; 3] = Layout::vertical([Constraint::Length(3); 3]).areas(popup);
    for (field, row) in Field::ALL.into_iter().zip(rows) {
        let input = form.field(field);
        let text = match field {
            Field::Password => "•".repeat(input.len()),
            _ => input.value().to_string(),
        };
        let border = if form.focus() == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(format!(" {} ", field.label())),
            ),
            row,
        );

        if form.focus() == field {
            // +1 for border
            let offset = u16::try_from(input.cursor()).unwrap_or(u16::MAX);
            let x = row.x.saturating_add(1).saturating_add(offset);
            let x = x.min(row.right().saturating_sub(2));
            frame.set_cursor_position(Position::new(x, row.y + 1));
        }
    }
}

fn render_confirm(frame: &mut Frame, session: &Session, area: Rect) {
    let credentials = session.form().credentials();
    let mut lines = vec![
        summary_line("Scope:    ", session.scope().as_str().to_string()),
        summary_line("Base URL: ", credentials.base_url.trim().to_string()),
        summary_line("Username: ", credentials.username.clone()),
        summary_line("Password: ", "•".repeat(credentials.password.chars().count())),
        Line::default(),
        Line::styled("Files to update:", Style::default().bold()),
    ];

    let validation = session.validation().unwrap_or_default();
    for target in session.chosen_targets() {
        let result = validation.iter().find(|v| v.target_id == target.id);
        let line = match result {
            Some(v) if v.is_eligible() => Line::from(vec![
                Span::styled("  ✓ ", Style::default().fg(Color::Green)),
                Span::raw(format!("{:<16}", target.display_name)),
                Span::styled(
                    v.path.as_ref().map(|p| p.display().to_string()).unwrap_or_default(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Some(v) => Line::from(vec![
                Span::styled("  ! ", Style::default().fg(Color::Yellow)),
                Span::raw(format!("{:<16}", target.display_name)),
                Span::styled(
                    v.reason.clone().unwrap_or_else(|| "will be skipped".to_string()),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            None => Line::from(format!("  ? {}", target.display_name)),
        };
        lines.push(line);
    }

    lines.push(Line::default());
    lines.push(Line::styled(
        "Each file is updated on its own; there is no rollback across tools. Existing files are \
         backed up next to the original as <name>.<timestamp>.bak. Every update that replaces an \
         existing entry adds another backup, and those backups hold the previous password in \
         plain text; delete old .bak files you no longer need. Edits made to these files by \
         other programs while installing may be overwritten.",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Install? ")),
        area,
    );
}

fn summary_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![Span::styled(label, Style::default().bold()), Span::raw(value)])
}

fn render_installing(frame: &mut Frame, area: Rect) {
    let vertical = Layout::vertical([Constraint::Length(1)]).flex(Flex::Center);
    let [center] = vertical.areas(area);
    frame.render_widget(
        Paragraph::new("Writing configuration files...")
            .style(Style::default().fg(Color::Cyan))
            .centered(),
        center,
    );
}

fn render_results(frame: &mut Frame, session: &Session, area: Rect) {
    let results = session.results();
    let mut lines: Vec<Line> = results.iter().map(result_line).collect();

    let summary = BatchSummary::from_results(results);
    lines.push(Line::default());
    lines.push(Line::styled(
        format!("{} succeeded, {} failed", summary.succeeded, summary.failed),
        Style::default().bold(),
    ));
    if summary.succeeded > 0 {
        lines.push(Line::from("Restart the updated tools to load the Jira server."));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn result_line(result: &InjectionResult) -> Line<'static> {
    if result.success {
        let action = match result.action {
            Some(EntryAction::Added) => "added",
            Some(EntryAction::Replaced) => "updated",
            Some(EntryAction::Unchanged) => "already up to date",
            None => "done",
        };
        let mut detail = format!(
            "{} ({action})",
            result.path.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
        );
        if let Some(backup) = &result.backup_name {
            detail.push_str(&format!(", backup {backup}"));
        }
        Line::from(vec![
            Span::styled("✓ ", Style::default().fg(Color::Green)),
            Span::styled(format!("{:<16}", result.target_id), Style::default().bold()),
            Span::raw(detail),
        ])
    } else {
        Line::from(vec![
            Span::styled("✗ ", Style::default().fg(Color::Red)),
            Span::styled(format!("{:<16}", result.target_id), Style::default().bold()),
            Span::styled(
                result.message.clone().unwrap_or_default(),
                Style::default().fg(Color::Red),
            ),
        ])
    }
}

fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(9)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [v_area] = vertical.areas(area);
    let [h_area] = horizontal.areas(v_area);
    h_area
}
