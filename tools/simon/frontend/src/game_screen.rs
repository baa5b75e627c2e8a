use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::Sender;
use ratatui::{crossterm::event::{Event, KeyCode, KeyEventKind}, layout::{Constraint, Direction, Layout, Rect}, style::{Color, Stylize}, symbols::border, text::{Line, Span}, widgets::{Block, Paragraph}, Frame};
use simon_core::{Simon, SimonConfig, VirtualBoard};
use tracing::info;

use crate::{helpers::{Ticker, SCHEME}, screen::{apply_touch, BoardView}, Component, GlobalEvent};

pub struct GameScreen {
    game: Simon<VirtualBoard>,
    ticker: Ticker,
    board_area: Rect,
    tx: Sender<GlobalEvent>,
}

impl GameScreen {
    pub fn init(tx: Sender<GlobalEvent>, config: SimonConfig, tick: Duration) -> Result<Self> {
        let game = Simon::new(config, VirtualBoard::new(config.extents))?;
        info!(seed = config.seed, round_length = config.initial_round_length, "starting game");

        Ok(Self {
            game,
            ticker: Ticker::new(tick),
            board_area: Rect::default(),
            tx,
        })
    }

    fn status(&self) -> Line<'static> {
        let store = self.game.store();
        Line::from(vec![
            Span::raw(format!(" {:?} ", self.game.state())).fg(SCHEME.orange[3]),
            Span::raw(format!("| round {} | showing {}/{} ", self.game.round_length(), store.active_length(), store.len())),
            Span::raw("| 1-4 / mouse: touch  r: reset  q: quit ").fg(SCHEME.gray[1]),
        ])
    }
}

impl Component for GameScreen {
    fn update(&mut self, events: Vec<Event>) {
        for event in &events {
            if apply_touch(self.game.board_mut(), self.board_area, event) {
                continue;
            }

            if let Event::Key(key) = event {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        let _ = self.tx.send(GlobalEvent::Quit);
                    }
                    KeyCode::Char('r') => {
                        info!("reset requested");
                        self.game.board_mut().clear_screen();
                        self.game.init();
                    }
                    _ => {}
                }
            }
        }

        for _ in 0..self.ticker.due() {
            self.game.tick();
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(1)])
            .split(area);

        let block = Block::bordered()
            .border_set(border::ROUNDED)
            .title("─ SIMON ")
            .title_style(SCHEME.style(Color::Rgb(36, 36, 36)).italic().bold());
        self.board_area = block.inner(layout[0]);

        frame.render_widget(block, layout[0]);
        frame.render_widget(BoardView::new(self.game.board()), self.board_area);
        frame.render_widget(Paragraph::new(self.status()), layout[1]);
    }
}
