use crate::cards::{Card, Rank, Suit};
use crate::game::{Player, TurnState};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let game = app.game();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(5), // community
            Constraint::Min(8),    // seats
            Constraint::Length(8), // messages
            Constraint::Length(4), // status bar
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(format!(
        "Hand #{}   Blinds {}/{}   Pot {}   {}",
        game.hand_number(),
        game.minimum_bet() / 2,
        game.minimum_bet(),
        game.pot(),
        pending_line(app),
    )))
    .block(Block::default().title("holdem-rs").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    // Community: five slots, face down until revealed
    let title = if game.hand_number() == 0 {
        "Community".to_string()
    } else {
        format!("Community ({})", game.phase())
    };
    let community_area = chunks[1];
    f.render_widget(Block::default().title(title).borders(Borders::ALL), community_area);
    let shown = game.community();
    for (i, slot) in columns(inner(community_area), 5).into_iter().enumerate() {
        render_card_widget(f, slot, shown.get(i).copied(), None);
    }

    // Seats: top row left to right, bottom row right to left
    let seats_area = chunks[2];
    let total = game.players().len();
    let top = (total + 1) / 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(seats_area);
    for (c, area) in columns(rows[0], top).into_iter().enumerate() {
        render_seat(f, area, app, c);
    }
    let bottom = total - top;
    for (c, area) in columns(rows[1], bottom).into_iter().enumerate() {
        render_seat(f, area, app, total - 1 - c);
    }

    let msg_area = chunks[3];
    let visible = msg_area.height.saturating_sub(2) as usize;
    let messages: Vec<Line> = app.feed().recent(visible).map(Line::from).collect();
    let msgs = Paragraph::new(messages)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Table talk").borders(Borders::ALL));
    f.render_widget(msgs, msg_area);

    draw_status(f, chunks[4], app);

    if app.help_open() {
        draw_help(f);
    } else if app.amount_entry_active() {
        draw_amount_entry(f, app);
    }
}

fn pending_line(app: &AppState) -> String {
    let game = app.game();
    if game.pending_minimum_bet() != game.minimum_bet() {
        format!("(next hand {})", game.pending_minimum_bet())
    } else {
        String::new()
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    let game = app.game();
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(inner(area));

    let mut left = match game.turn() {
        TurnState::Idle => vec![Line::from("Press Space to deal the first hand.")],
        TurnState::HandComplete => vec![Line::from("Hand over. Press Space to deal again.")],
        TurnState::PhaseComplete => vec![Line::from("Press Space to reveal the next cards.")],
        TurnState::GameOver { won } => vec![Line::from(if won {
            "Session won! Press N for a new one."
        } else {
            "Busted. Press N for a new session."
        })],
        TurnState::AwaitingAction(seat) if seat == game.human_seat() => {
            let style = Style::default().add_modifier(Modifier::BOLD);
            let to_call = game.to_call(seat);
            let call = if to_call == 0 { "C check".to_string() } else { format!("C call {to_call}") };
            vec![Line::from(vec![
                Span::raw("Your turn: "),
                Span::styled("F fold", style),
                Span::raw(" • "),
                Span::styled(call, style),
                Span::raw(" • "),
                Span::styled(format!("R raise {}", app.suggested_raise()), style),
                Span::raw(" • "),
                Span::styled("A amount", style),
            ])]
        }
        TurnState::AwaitingAction(seat) => {
            let name = game.player(seat).map_or("?", Player::name);
            vec![Line::from(format!("{name} is thinking..."))]
        }
    };
    if let Some(err) = app.action_error() {
        left.push(Line::from(Span::styled(format!("Error: {err}"), Style::default().fg(Color::Red))));
    }
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    let right = Paragraph::new(vec![Line::from("? help • M menu"), Line::from("N new • Q quit")])
        .alignment(Alignment::Right);
    f.render_widget(right, cols[1]);
}

fn render_seat(f: &mut Frame, area: Rect, app: &AppState, seat: usize) {
    let game = app.game();
    let Some(p) = game.player(seat) else {
        return;
    };
    let hand_live = game.hand_number() > 0;
    let mut title = p.name().to_string();
    if seat == game.human_seat() {
        title.push_str(" (you)");
    }
    if hand_live && seat == game.small_blind_seat() {
        title.push_str(" [SB]");
    }
    if hand_live && seat == game.big_blind_seat() {
        title.push_str(" [BB]");
    }

    let status = if !p.is_active() {
        "Out"
    } else if p.is_all_in() {
        "All in"
    } else if p.is_playing() {
        "In"
    } else if hand_live {
        "Folded"
    } else {
        "Waiting"
    };
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if !p.is_active() || (hand_live && !p.is_playing()) {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else if app.feed().is_winner(seat) && game.turn() == TurnState::HandComplete {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if game.acting_seat() == Some(seat) {
        block = block.border_style(Style::default().fg(Color::Yellow));
    } else if p.is_all_in() {
        block = block.border_style(Style::default().fg(Color::LightRed));
    }
    f.render_widget(block, area);

    let seat_inner = inner(area);
    let lines = vec![
        Line::from(format!("Chips: {}", p.chips())),
        Line::from(format!("Bet: {}", p.bet())),
        Line::from(status),
    ];
    let hole = if seat == game.human_seat() { p.hole() } else { app.feed().shown(seat) };
    let mut text_area = seat_inner;
    if p.is_playing() && seat_inner.height > 5 {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(seat_inner);
        text_area = split[0];
        let cards = columns(split[1], 2);
        let (a, b) = match hole {
            Some(h) => (Some(h.first()), Some(h.second())),
            None => (None, None),
        };
        render_card_widget(f, cards[0], a, Some(Color::Cyan));
        render_card_widget(f, cards[1], b, Some(Color::Cyan));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal / next phase"),
        Line::from("- F: fold"),
        Line::from("- C: check / call"),
        Line::from("- R: raise by the minimum bet"),
        Line::from("- A: enter an amount"),
        Line::from("- N: new session"),
        Line::from("- M: settings menu"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from(Span::styled("Amount Entry:", bold)),
        Line::from("- 0-9 / Backspace: edit"),
        Line::from("- + / -: step by the minimum bet"),
        Line::from("- Enter: bet, Esc: cancel"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_amount_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let game = app.game();
    let to_call = game.to_call(game.human_seat());
    let current = app.amount_entry_text().unwrap_or("");
    let lines = vec![
        Line::from(format!("Chips to put in: {current}")),
        Line::from(format!("To call: {to_call}")),
        Line::from("Digits to edit, Backspace to delete"),
        Line::from("+/- by the minimum bet, Enter submit, Esc cancel"),
    ];
    let block = Block::default().title("Bet Amount").borders(Borders::ALL);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner(area));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    let error = app.amount_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    f.render_widget(Paragraph::new(error_line).alignment(Alignment::Center), chunks[1]);
}

fn suit_style(s: Suit) -> Style {
    let color = if s.is_red() { Color::Red } else { Color::White };
    Style::default().fg(color)
}

fn rank_label(r: Rank) -> String {
    match r {
        Rank::Ten => "10".to_string(),
        r => r.to_char().to_string(),
    }
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(block, area);
    let content = match card {
        Some(c) => {
            let label = format!("{}{}", rank_label(c.rank()), c.suit().glyph());
            Line::from(Span::styled(label, suit_style(c.suit())))
        }
        None => Line::from(Span::styled("░░", Style::default().fg(Color::DarkGray))),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner(area));
}
