use crate::*;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use rowwindow::{
    RenderTarget, RendererOptions, RowContent, RowPlacement, RowSource, Viewport, WindowDelta,
    WindowRange, WindowedRowRenderer,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Cells(Vec<(&'static str, String)>);

impl Cells {
    fn for_row(index: usize) -> Self {
        Self(vec![
            ("id", alloc::format!("{index}")),
            ("name", alloc::format!("row {index}")),
        ])
    }

    fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }
}

impl RowContent for Cells {
    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match self.0.iter_mut().find(|(name, _)| *name == field) {
            Some((_, cell)) => {
                *cell = String::from(value);
                true
            }
            None => false,
        }
    }
}

struct Table(Vec<Cells>);

impl Table {
    fn new(row_count: usize) -> Self {
        Self((0..row_count).map(Cells::for_row).collect())
    }
}

impl RowSource for Table {
    type Row = Cells;

    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn render_row(&self, index: usize) -> Option<Cells> {
        self.0.get(index).cloned()
    }

    fn write_field(&mut self, index: usize, field: &str, value: &str) -> bool {
        self.0
            .get_mut(index)
            .is_some_and(|row| row.set_field(field, value))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Op {
    Height(u64),
    Show(usize, u64, Cells),
    Hide(usize),
    Refresh(usize, Cells),
    Attach,
    Detach,
}

#[derive(Default)]
struct Recorder {
    scroll_top: u64,
    height: u32,
    ops: Vec<Op>,
}

impl Recorder {
    fn new(height: u32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    fn take_ops(&mut self) -> Vec<Op> {
        core::mem::take(&mut self.ops)
    }
}

impl RenderTarget<Cells> for Recorder {
    fn viewport(&self) -> Option<Viewport> {
        Some(Viewport {
            scroll_top: self.scroll_top,
            height: self.height,
        })
    }

    fn set_content_height(&mut self, height: u64) {
        self.ops.push(Op::Height(height));
    }

    fn show_row(&mut self, placement: RowPlacement, row: &Cells) {
        self.ops
            .push(Op::Show(placement.index, placement.top, row.clone()));
    }

    fn hide_row(&mut self, index: usize) {
        self.ops.push(Op::Hide(index));
    }

    fn refresh_row(&mut self, index: usize, row: &Cells) {
        self.ops.push(Op::Refresh(index, row.clone()));
    }

    fn attach_scroll_listener(&mut self) {
        self.ops.push(Op::Attach);
    }

    fn detach_scroll_listener(&mut self) {
        self.ops.push(Op::Detach);
    }
}

fn placement(index: usize) -> RowPlacement {
    RowPlacement::for_index(index, 40)
}

#[test]
fn batcher_holds_writes_until_flush() {
    let mut b: StyleBatcher<Recorder, Cells> = StyleBatcher::new(Recorder::new(200));
    b.set_content_height(4_000);
    b.show_row(placement(2), &Cells::for_row(2));
    b.hide_row(1);

    assert!(b.is_dirty());
    assert_eq!(b.pending_rows(), 2);
    assert!(b.inner().ops.is_empty());

    assert_eq!(b.flush(), 3);
    assert_eq!(
        b.inner_mut().take_ops(),
        vec![
            Op::Height(4_000),
            Op::Hide(1),
            Op::Show(2, 80, Cells::for_row(2)),
        ]
    );
    assert!(!b.is_dirty());
    assert_eq!(b.flush(), 0);
    assert_eq!(b.flushed_writes(), 3);
}

#[test]
fn batcher_collapses_writes_per_row() {
    let mut b: StyleBatcher<Recorder, Cells> = StyleBatcher::new(Recorder::new(200));

    // show then hide: hide
    b.show_row(placement(1), &Cells::for_row(1));
    b.hide_row(1);
    // hide then show: show
    b.hide_row(2);
    b.show_row(placement(2), &Cells::for_row(2));
    // refresh folds into a pending show
    let mut edited = Cells::for_row(3);
    edited.set_field("name", "edited");
    b.show_row(placement(3), &Cells::for_row(3));
    b.refresh_row(3, &edited);
    // refresh after hide is dropped
    b.hide_row(4);
    b.refresh_row(4, &Cells::for_row(4));
    // two refreshes: the last wins
    let mut first = Cells::for_row(5);
    first.set_field("name", "first");
    let mut second = Cells::for_row(5);
    second.set_field("name", "second");
    b.refresh_row(5, &first);
    b.refresh_row(5, &second);
    // last spacer height wins
    b.set_content_height(10);
    b.set_content_height(20);

    assert_eq!(b.flush(), 6);
    assert_eq!(
        b.inner_mut().take_ops(),
        vec![
            Op::Height(20),
            Op::Hide(1),
            Op::Show(2, 80, Cells::for_row(2)),
            Op::Show(3, 120, edited),
            Op::Hide(4),
            Op::Refresh(5, second),
        ]
    );
}

#[test]
fn batcher_passes_reads_and_listeners_through() {
    let mut b: StyleBatcher<Recorder, Cells> = StyleBatcher::new(Recorder::new(321));
    b.inner_mut().scroll_top = 77;

    assert_eq!(
        RenderTarget::<Cells>::viewport(&b),
        Some(Viewport {
            scroll_top: 77,
            height: 321
        })
    );
    RenderTarget::<Cells>::attach_scroll_listener(&mut b);
    RenderTarget::<Cells>::detach_scroll_listener(&mut b);
    assert_eq!(b.inner().ops, vec![Op::Attach, Op::Detach]);
    assert!(!b.is_dirty());
}

#[test]
fn batcher_discard_drops_pending_writes() {
    let mut b: StyleBatcher<Recorder, Cells> = StyleBatcher::new(Recorder::new(200));
    b.show_row(placement(0), &Cells::for_row(0));
    b.set_content_height(1);
    b.discard();

    assert_eq!(b.flush(), 0);
    assert!(b.into_inner().ops.is_empty());
}

#[test]
fn renderer_writes_through_batcher_only_on_flush() {
    let mut r = WindowedRowRenderer::init(
        RendererOptions::new(40),
        Table::new(100),
        StyleBatcher::new(Recorder::new(200)),
    )
    .unwrap();

    let batcher = r.target_mut().unwrap();
    // attach is immediate, the rest waits for the flush
    assert_eq!(batcher.inner().ops, vec![Op::Attach]);
    assert_eq!(batcher.flush(), 11);
}

fn controller(row_count: usize) -> Controller<Table, Recorder> {
    let options = RendererOptions::new(40).with_buffer_size(5);
    Controller::new(options, Table::new(row_count), Recorder::new(200)).unwrap()
}

fn scroll(c: &mut Controller<Table, Recorder>, scroll_top: u64) {
    c.target_mut().unwrap().scroll_top = scroll_top;
    c.on_scroll();
}

#[test]
fn controller_draws_initial_window_immediately() {
    let mut c = controller(1000);
    let ops = c.target_mut().unwrap().take_ops();

    assert_eq!(ops[0], Op::Attach);
    assert_eq!(ops[1], Op::Height(40_000));
    let shown: Vec<usize> = ops
        .iter()
        .filter_map(|op| match op {
            Op::Show(i, _, _) => Some(*i),
            _ => None,
        })
        .collect();
    assert_eq!(shown, (0..10).collect::<Vec<_>>());
    assert!(c.renderer().options().coalesce_scroll);
}

#[test]
fn controller_syncs_once_per_tick() {
    let mut c = controller(1000);
    c.target_mut().unwrap().take_ops();

    for top in [40u64, 80, 200, 400] {
        scroll(&mut c, top);
    }
    assert!(c.target().unwrap().ops.is_empty());

    let outcome = c.tick();
    assert_eq!(
        outcome.delta,
        WindowDelta {
            evicted: 10,
            materialized: 10
        }
    );
    assert_eq!(outcome.writes, 20);
    assert_eq!(c.renderer().window(), WindowRange::new(10, 20));
    assert_eq!(c.target_mut().unwrap().take_ops().len(), 20);

    assert_eq!(c.tick(), FrameOutcome::default());
}

#[test]
fn controller_publishes_window_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut c = controller(1000);
    c.events_mut()
        .subscribe(TableEvent::WINDOW_CHANGED, move |e: &TableEvent| {
            sink.borrow_mut().push(*e)
        });

    scroll(&mut c, 400);
    c.tick();
    // Sub-row scroll: nothing changes, nothing is published.
    scroll(&mut c, 410);
    c.tick();

    assert_eq!(
        *seen.borrow(),
        vec![TableEvent::WindowChanged {
            window: WindowRange::new(10, 20),
            delta: WindowDelta {
                evicted: 10,
                materialized: 10
            },
        }]
    );
}

#[test]
fn controller_update_lands_on_next_tick() {
    let updated = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&updated);
    let mut c = controller(1000);
    c.events_mut()
        .subscribe(TableEvent::ROW_UPDATED, move |e: &TableEvent| {
            sink.borrow_mut().push(*e)
        });
    c.target_mut().unwrap().take_ops();

    assert!(c.update_row(3, [("name", "X")]));
    assert!(c.target().unwrap().ops.is_empty());

    let outcome = c.tick();
    assert!(outcome.delta.is_empty());
    assert_eq!(outcome.writes, 1);
    let ops = c.target_mut().unwrap().take_ops();
    match &ops[..] {
        [Op::Refresh(3, row)] => assert_eq!(row.get("name"), Some("X")),
        other => panic!("unexpected ops: {other:?}"),
    }
    assert_eq!(*updated.borrow(), vec![TableEvent::RowUpdated { index: 3 }]);

    assert!(!c.update_row(5_000, [("name", "X")]));
    assert_eq!(updated.borrow().len(), 1);
}

#[test]
fn controller_resize_draws_immediately() {
    let mut c = controller(1000);
    let resized = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&resized);
    c.events_mut()
        .subscribe(TableEvent::RESIZED, move |e: &TableEvent| {
            if let TableEvent::Resized { row_count } = e {
                *sink.borrow_mut() = *row_count;
            }
        });
    c.target_mut().unwrap().take_ops();

    let outcome = c.resize(4);
    assert_eq!(outcome.delta.evicted, 6);
    assert_eq!(*resized.borrow(), 4);
    let ops = c.target_mut().unwrap().take_ops();
    assert_eq!(ops[0], Op::Height(160));
    assert_eq!(ops.len(), 7);
}

#[test]
fn controller_destroy_detaches_and_drops_pending() {
    let mut c = controller(1000);
    scroll(&mut c, 400);
    c.destroy();

    assert!(c.renderer().is_destroyed());
    assert!(c.target().is_none());
    assert_eq!(c.tick(), FrameOutcome::default());
    assert_eq!(c.resize(10), FrameOutcome::default());
    c.destroy();
}

#[test]
fn event_bus_runs_handlers_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut bus = EventBus::<u32>::new();

    let a = Rc::clone(&log);
    bus.subscribe("tick", move |v: &u32| a.borrow_mut().push(("a", *v)));
    let b = Rc::clone(&log);
    let id_b = bus.subscribe("tick", move |v: &u32| b.borrow_mut().push(("b", *v)));
    let c = Rc::clone(&log);
    bus.subscribe("other", move |v: &u32| c.borrow_mut().push(("c", *v)));

    assert_eq!(bus.publish("tick", &1), 2);
    assert_eq!(bus.publish("missing", &2), 0);
    assert!(bus.unsubscribe(id_b));
    assert!(!bus.unsubscribe(id_b));
    assert_eq!(bus.publish("tick", &3), 1);

    assert_eq!(*log.borrow(), vec![("a", 1), ("b", 1), ("a", 3)]);
    assert_eq!(bus.handler_count("tick"), 1);
    assert_eq!(bus.handler_count("other"), 1);

    bus.clear("other");
    assert_eq!(bus.handler_count("other"), 0);
    assert_eq!(bus.publish("other", &4), 0);
}

#[test]
fn event_bus_drops_empty_channels() {
    let mut bus = EventBus::<()>::default();
    let id = bus.subscribe("only", |_: &()| {});
    assert!(bus.unsubscribe(id));
    assert_eq!(alloc::format!("{bus:?}"), "{}");
}

#[test]
fn table_events_name_their_channels() {
    let e = TableEvent::RowUpdated { index: 1 };
    assert_eq!(e.channel(), TableEvent::ROW_UPDATED);
    assert_eq!(
        TableEvent::Resized { row_count: 0 }.channel(),
        TableEvent::RESIZED
    );
}

#[test]
fn edit_actions_transform_text() {
    assert_eq!(EditAction::Uppercase.apply("MiXed"), "MIXED");
    assert_eq!(EditAction::Lowercase.apply("MiXed"), "mixed");
    assert_eq!(
        EditAction::Capitalize.apply("hello  wORLD\tagain"),
        "Hello  World\tAgain"
    );
    assert_eq!(EditAction::Trim.apply("  padded \n"), "padded");
    assert_eq!(EditAction::Clear.apply("anything"), "");
}

#[test]
fn edit_action_ids_round_trip() {
    for action in EditAction::ALL {
        assert_eq!(EditAction::from_id(action.id()), Some(action));
    }
    assert_eq!(EditAction::from_id("shout"), None);
}

#[test]
fn apply_edit_keeps_cache_fresh() {
    let mut r = WindowedRowRenderer::init(
        RendererOptions::new(40).with_buffer_size(5),
        Table::new(1000),
        Recorder::new(200),
    )
    .unwrap();

    // Row 2 scrolls out, is edited while hidden, then scrolls back.
    r.target_mut().unwrap().scroll_top = 400;
    r.on_scroll();
    assert!(apply_edit(&mut r, 2, "name", "row 2", EditAction::Uppercase));
    assert_eq!(r.cached_row(2).unwrap().get("name"), Some("ROW 2"));
    assert_eq!(r.source().unwrap().0[2].get("name"), Some("ROW 2"));

    r.target_mut().unwrap().take_ops();
    r.target_mut().unwrap().scroll_top = 0;
    r.on_scroll();
    let ops = r.target_mut().unwrap().take_ops();
    assert!(ops.contains(&Op::Show(2, 80, {
        let mut row = Cells::for_row(2);
        row.set_field("name", "ROW 2");
        row
    })));

    assert!(!apply_edit(&mut r, 2, "missing", "x", EditAction::Trim));
}

#[test]
fn controller_apply_edit_refreshes_visible_row() {
    let mut c = controller(100);
    c.target_mut().unwrap().take_ops();

    assert!(c.apply_edit(1, "name", "  spaced  ", EditAction::Trim));
    c.tick();
    let ops = c.target_mut().unwrap().take_ops();
    match &ops[..] {
        [Op::Refresh(1, row)] => assert_eq!(row.get("name"), Some("spaced")),
        other => panic!("unexpected ops: {other:?}"),
    }
}
