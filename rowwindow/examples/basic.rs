// Example: a 100k-row table behind a 600px viewport, scrolled to the middle and back.
use rowwindow::{
    RenderTarget, RendererOptions, RowContent, RowPlacement, RowSource, Viewport,
    WindowedRowRenderer,
};

#[derive(Clone, Debug)]
struct Row {
    cells: Vec<(&'static str, String)>,
}

impl RowContent for Row {
    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match self.cells.iter_mut().find(|(name, _)| *name == field) {
            Some((_, cell)) => {
                *cell = value.to_string();
                true
            }
            None => false,
        }
    }
}

struct Table {
    rows: Vec<Row>,
}

impl RowSource for Table {
    type Row = Row;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn render_row(&self, index: usize) -> Option<Row> {
        self.rows.get(index).cloned()
    }

    fn write_field(&mut self, index: usize, field: &str, value: &str) -> bool {
        self.rows
            .get_mut(index)
            .is_some_and(|row| row.set_field(field, value))
    }
}

struct Container {
    scroll_top: u64,
    shown: usize,
}

impl RenderTarget<Row> for Container {
    fn viewport(&self) -> Option<Viewport> {
        Some(Viewport {
            scroll_top: self.scroll_top,
            height: 600,
        })
    }

    fn set_content_height(&mut self, height: u64) {
        println!("spacer height={height}");
    }

    fn show_row(&mut self, _placement: RowPlacement, _row: &Row) {
        self.shown += 1;
    }

    fn hide_row(&mut self, _index: usize) {
        self.shown -= 1;
    }

    fn refresh_row(&mut self, index: usize, row: &Row) {
        println!("refresh row {index}: {:?}", row.cells);
    }
}

fn main() {
    let table = Table {
        rows: (0..100_000)
            .map(|i| Row {
                cells: vec![("id", i.to_string()), ("name", format!("item {i}"))],
            })
            .collect(),
    };
    let container = Container {
        scroll_top: 0,
        shown: 0,
    };

    let options = RendererOptions::new(30).with_buffer_size(4);
    let mut r = match WindowedRowRenderer::init(options, table, container) {
        Ok(r) => r,
        Err(err) => {
            eprintln!("init failed: {err}");
            return;
        }
    };
    println!("initial window={:?}", r.window());

    if let Some(c) = r.target_mut() {
        c.scroll_top = 1_500_000;
    }
    let delta = r.on_scroll();
    println!("window={:?} delta={delta:?}", r.window());

    r.update_row(50_010, [("name", "edited")]);

    if let Some(c) = r.target_mut() {
        c.scroll_top = 0;
    }
    r.on_scroll();
    println!("stats={:?}", r.stats());
    println!("shown={}", r.target().map_or(0, |c| c.shown));

    r.destroy();
}
