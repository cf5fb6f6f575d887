// Example: a burst of scroll events folded into one sync and one flush per frame.
use rowwindow::{RenderTarget, RendererOptions, RowContent, RowPlacement, RowSource, Viewport};
use rowwindow_adapter::{Controller, EditAction, TableEvent};

#[derive(Clone, Debug)]
struct Row(String);

impl RowContent for Row {
    fn set_field(&mut self, field: &str, value: &str) -> bool {
        if field != "text" {
            return false;
        }
        self.0 = value.to_string();
        true
    }
}

struct Lines(Vec<Row>);

impl RowSource for Lines {
    type Row = Row;

    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn render_row(&self, index: usize) -> Option<Row> {
        self.0.get(index).cloned()
    }

    fn write_field(&mut self, index: usize, field: &str, value: &str) -> bool {
        self.0
            .get_mut(index)
            .is_some_and(|row| row.set_field(field, value))
    }
}

#[derive(Default)]
struct Screen {
    scroll_top: u64,
    writes: usize,
}

impl RenderTarget<Row> for Screen {
    fn viewport(&self) -> Option<Viewport> {
        Some(Viewport {
            scroll_top: self.scroll_top,
            height: 480,
        })
    }

    fn set_content_height(&mut self, _height: u64) {
        self.writes += 1;
    }

    fn show_row(&mut self, _placement: RowPlacement, _row: &Row) {
        self.writes += 1;
    }

    fn hide_row(&mut self, _index: usize) {
        self.writes += 1;
    }

    fn refresh_row(&mut self, _index: usize, _row: &Row) {
        self.writes += 1;
    }
}

fn main() {
    let lines = Lines((0..50_000).map(|i| Row(format!("line {i}"))).collect());
    let options = RendererOptions::new(24).with_buffer_size(3);
    let mut c = match Controller::new(options, lines, Screen::default()) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("init failed: {err}");
            return;
        }
    };
    c.events_mut()
        .subscribe(TableEvent::WINDOW_CHANGED, |e: &TableEvent| println!("{e:?}"));

    for frame in 0..5u64 {
        // Several scroll events arrive between paints.
        for step in 0..8u64 {
            if let Some(screen) = c.target_mut() {
                screen.scroll_top = frame * 2_400 + step * 30;
            }
            c.on_scroll();
        }
        let outcome = c.tick();
        println!("frame {frame}: {outcome:?}");
    }

    c.apply_edit(100, "text", "line 100", EditAction::Uppercase);
    c.tick();
    println!("stats={:?}", c.renderer().stats());
    println!("writes={}", c.target().map_or(0, |s| s.writes));
}
