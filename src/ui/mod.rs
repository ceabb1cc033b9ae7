pub mod canvas;

pub use canvas::{BufferCanvas, Viewport};

use crate::frame::Orchestrator;
use crate::services::AssetProvider;
use crate::state_machine::GameMode;
use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw one frame into the terminal and return the viewport the world was
/// mapped onto, for translating mouse positions back.
pub fn draw_ui(frame: &mut Frame, orchestrator: &Orchestrator, assets: &dyn AssetProvider) -> Viewport {
    let size = frame.size();

    let border = match orchestrator.game.mode() {
        GameMode::Playing if orchestrator.game.is_paused() => Color::DarkGray,
        GameMode::Playing => Color::Green,
        GameMode::GameOver => Color::Red,
        _ => Color::Cyan,
    };
    let title = format!(
        " Skybird · {} · best {} ",
        orchestrator.session.difficulty.name(),
        orchestrator.session.high_score
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);

    let inner = block.inner(size);
    frame.render_widget(block, size);

    let mut canvas = BufferCanvas::new(frame.buffer_mut(), inner);
    orchestrator.draw(&mut canvas, assets);

    Viewport::new(inner)
}
