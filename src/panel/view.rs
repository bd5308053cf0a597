//! Panel rendering.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::{Modal, PanelState, ACTIONS};

/// Render the whole panel, including any active modal prompt.
pub(crate) fn draw(frame: &mut Frame, state: &PanelState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            // Action list plus its borders.
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_title(frame, chunks[0], state);
    draw_actions(frame, chunks[1], state);
    draw_status(frame, chunks[2], state);
    draw_message(frame, chunks[3], state);
    draw_footer(frame, chunks[4], state);

    if let Some(modal) = &state.modal {
        draw_modal(frame, modal);
    }
}

fn draw_title(frame: &mut Frame, area: Rect, state: &PanelState) {
    let title = Paragraph::new(state.title.as_str())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn draw_actions(frame: &mut Frame, area: Rect, state: &PanelState) {
    let item_style = if state.actions_enabled {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let items: Vec<ListItem> = ACTIONS
        .iter()
        .map(|label| ListItem::new(*label).style(item_style))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Actions"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &PanelState) {
    let status = Paragraph::new(Line::from(vec![
        Span::raw("Status: "),
        Span::styled(
            state.status.label(),
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_message(frame: &mut Frame, area: Rect, state: &PanelState) {
    let message = Paragraph::new(state.message.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(message, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &PanelState) {
    let footer = Paragraph::new(state.footer.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn draw_modal(frame: &mut Frame, modal: &Modal) {
    let area = centered_rect(70, 7, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from(modal.prompt.as_str())];
    if let Some(detail) = &modal.error {
        lines.push(Line::from(Span::styled(
            detail.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("> {}", modal.input.display()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "Enter: submit   Esc: cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(modal.title.as_str()),
    );
    frame.render_widget(body, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(horizontal[1]);

    vertical[1]
}
