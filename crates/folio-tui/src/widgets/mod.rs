mod carousel;
mod detail_panel;
mod page_view;
mod status_bar;

pub use carousel::CarouselWidget;
pub use detail_panel::DetailPanelWidget;
pub use page_view::PageWidget;
pub use status_bar::StatusBarWidget;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::app::App;

/// Draw one frame: page, carousel, detail panel and status bar
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    app.resize(size.width, size.height);

    let page = app.page_area();
    PageWidget::render(frame, page, app);
    CarouselWidget::render(frame, page, app);
    DetailPanelWidget::render(frame, page, app);
    StatusBarWidget::render(frame, app.status_area(), app);
}

/// Copy an off-screen buffer into `dest` with its top-left at
/// (`origin_x`, `origin_y`), keeping only cells inside `clip`.
///
/// Cards and the sliding panel are drawn whole into a scratch buffer, then
/// copied so they can be partly off screen.
pub(crate) fn blit(src: &Buffer, dest: &mut Buffer, origin_x: i32, origin_y: i32, clip: Rect) {
    let clip = clip.intersection(dest.area);
    for y in 0..src.area.height {
        let ty = origin_y + i32::from(y);
        if ty < i32::from(clip.top()) || ty >= i32::from(clip.bottom()) {
            continue;
        }
        for x in 0..src.area.width {
            let tx = origin_x + i32::from(x);
            if tx < i32::from(clip.left()) || tx >= i32::from(clip.right()) {
                continue;
            }
            let (Some(cell), Some(target)) = (
                src.cell((src.area.x + x, src.area.y + y)),
                dest.cell_mut((tx as u16, ty as u16)),
            ) else {
                continue;
            };
            *target = cell.clone();
        }
    }
}
