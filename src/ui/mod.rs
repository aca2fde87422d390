mod quiz;
mod result;
mod status;

use std::time::Instant;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::Phase;

pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let snapshot = app.session().snapshot();
    match snapshot.phase {
        Phase::Loading => status::render_loading(frame, area, app.theme()),
        Phase::Error => status::render_error(
            frame,
            area,
            app.theme(),
            snapshot.load_error.unwrap_or("unknown error"),
        ),
        Phase::InProgress => quiz::render(frame, area, app, &snapshot, now),
        Phase::Finished => result::render(frame, area, app, &snapshot),
    }
}
