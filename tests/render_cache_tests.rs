use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use remote_canvas::core::{
    FrameOrigin, RedrawSurface, RenderCache, SourceRect,
};
use remote_canvas::CacheError;

/// Mock surface for observing redraw signals
struct MockSurface {
    redraws: Rc<RefCell<usize>>,
}

impl RedrawSurface for MockSurface {
    fn request_redraw(&self) {
        *self.redraws.borrow_mut() += 1;
    }
}

fn counted_cache() -> (RenderCache, Rc<RefCell<usize>>) {
    let redraws = Rc::new(RefCell::new(0));
    let cache = RenderCache::new(Box::new(MockSurface { redraws: redraws.clone() }));
    (cache, redraws)
}

fn publish(cache: &mut RenderCache, pixels: &[u32], rect: SourceRect) {
    cache.set_source(Arc::from(pixels.to_vec()), rect).unwrap();
}

fn frame_pixels(cache: &RenderCache) -> Vec<u32> {
    cache.render().unwrap().rows().flatten().copied().collect()
}

// ============================================================================
// Source Selection
// ============================================================================

#[test]
fn test_never_dragged_renders_live_buffer() {
    let mut cache = RenderCache::detached();
    publish(&mut cache, &[1, 2, 3, 4], SourceRect::tight(2, 2));

    let frame = cache.render().unwrap();
    assert_eq!(frame.origin(), FrameOrigin::Live);
    assert_eq!(frame_pixels(&cache), vec![1, 2, 3, 4]);
}

#[test]
fn test_begin_drag_serves_snapshot_of_capture_moment() {
    let mut cache = RenderCache::detached();
    publish(&mut cache, &[1, 2, 3, 4], SourceRect::tight(2, 2));
    cache.begin_drag().unwrap();

    let frame = cache.render().unwrap();
    assert_eq!(frame.origin(), FrameOrigin::Snapshot);
    // Content equals the live window at the moment of begin_drag
    assert_eq!(frame_pixels(&cache), vec![1, 2, 3, 4]);
}

#[test]
fn test_snapshot_window_honors_offset_and_stride() {
    let mut cache = RenderCache::detached();
    #[rustfmt::skip]
    let pixels = [
        9, 1, 2, 9,
        9, 3, 4, 9,
    ];
    publish(&mut cache, &pixels, SourceRect::new(1, 4, 0, 0, 2, 2));
    cache.begin_drag().unwrap();

    assert_eq!(frame_pixels(&cache), vec![1, 2, 3, 4]);
}

// ============================================================================
// Deferred Invalidation
// ============================================================================

#[test]
fn test_update_during_drag_leaves_snapshot_untouched() {
    let mut cache = RenderCache::detached();
    publish(&mut cache, &[1, 2, 3, 4], SourceRect::tight(2, 2));
    cache.begin_drag().unwrap();

    publish(&mut cache, &[5, 6, 7, 8], SourceRect::tight(2, 2));
    cache.notify_update();

    // Still the frozen frame, not the new contents
    let frame = cache.render().unwrap();
    assert_eq!(frame.origin(), FrameOrigin::Snapshot);
    assert_eq!(frame_pixels(&cache), vec![1, 2, 3, 4]);
}

#[test]
fn test_dirty_drag_end_discards_snapshot() {
    let mut cache = RenderCache::detached();
    publish(&mut cache, &[1, 2, 3, 4], SourceRect::tight(2, 2));
    cache.begin_drag().unwrap();
    publish(&mut cache, &[5, 6, 7, 8], SourceRect::tight(2, 2));
    cache.notify_update();
    cache.end_drag();

    let frame = cache.render().unwrap();
    assert_eq!(frame.origin(), FrameOrigin::Live);
    assert_eq!(frame_pixels(&cache), vec![5, 6, 7, 8]);
}

#[test]
fn test_clean_drag_end_keeps_serving_snapshot() {
    let mut cache = RenderCache::detached();
    publish(&mut cache, &[1, 2, 3, 4], SourceRect::tight(2, 2));
    cache.begin_drag().unwrap();
    cache.end_drag();

    // Retained cache of the last rendered state, served while idle
    let frame = cache.render().unwrap();
    assert_eq!(frame.origin(), FrameOrigin::Snapshot);
    assert_eq!(frame_pixels(&cache), vec![1, 2, 3, 4]);
}

#[test]
fn test_retained_snapshot_ends_at_next_set_source() {
    let mut cache = RenderCache::detached();
    publish(&mut cache, &[1, 2, 3, 4], SourceRect::tight(2, 2));
    cache.begin_drag().unwrap();
    cache.end_drag();

    publish(&mut cache, &[5, 6, 7, 8], SourceRect::tight(2, 2));
    assert_eq!(cache.render().unwrap().origin(), FrameOrigin::Live);
    assert_eq!(frame_pixels(&cache), vec![5, 6, 7, 8]);
}

#[test]
fn test_retained_snapshot_reused_by_next_drag() {
    let mut cache = RenderCache::detached();
    publish(&mut cache, &[1, 2, 3, 4], SourceRect::tight(2, 2));
    cache.begin_drag().unwrap();
    cache.end_drag();
    cache.begin_drag().unwrap();

    // No invalidation between the drags: no re-capture happened
    assert_eq!(frame_pixels(&cache), vec![1, 2, 3, 4]);
}

#[test]
fn test_set_source_during_drag_defers_like_notify_update() {
    let mut cache = RenderCache::detached();
    publish(&mut cache, &[1, 2, 3, 4], SourceRect::tight(2, 2));
    cache.begin_drag().unwrap();
    publish(&mut cache, &[5, 6, 7, 8], SourceRect::tight(2, 2));

    // Snapshot survives until the drag ends, then the new source wins
    assert_eq!(cache.render().unwrap().origin(), FrameOrigin::Snapshot);
    cache.end_drag();
    assert_eq!(cache.render().unwrap().origin(), FrameOrigin::Live);
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_transform_carried_regardless_of_drag_state() {
    let mut cache = RenderCache::detached();
    publish(&mut cache, &[0; 4], SourceRect::tight(2, 2));
    cache.set_transform(2.0, 10.0, 20.0).unwrap();

    let frame = cache.render().unwrap();
    assert_eq!(frame.transform().scale, 2.0);
    assert_eq!((frame.transform().pivot_x, frame.transform().pivot_y), (10.0, 20.0));

    cache.begin_drag().unwrap();
    let frame = cache.render().unwrap();
    assert_eq!(frame.transform().scale, 2.0);
    assert_eq!((frame.transform().pivot_x, frame.transform().pivot_y), (10.0, 20.0));
}

#[test]
fn test_invalid_scale_rejected_without_mutation() {
    let mut cache = RenderCache::detached();
    cache.set_transform(3.0, 1.0, 1.0).unwrap();

    assert_eq!(cache.set_transform(-1.0, 0.0, 0.0), Err(CacheError::InvalidScale(-1.0)));
    assert_eq!(cache.scale(), 3.0);
}

// ============================================================================
// Geometry Rejection
// ============================================================================

#[test]
fn test_stride_less_than_width_rejected_atomically() {
    let mut cache = RenderCache::detached();
    publish(&mut cache, &[1, 2, 3, 4], SourceRect::tight(2, 2));

    let result = cache.set_source(Arc::from(vec![0u32; 16]), SourceRect::new(0, 2, 0, 0, 4, 2));
    assert!(matches!(result, Err(CacheError::InvalidGeometry(_))));

    // Prior state fully intact
    assert_eq!(cache.source_width(), Some(2));
    assert_eq!(frame_pixels(&cache), vec![1, 2, 3, 4]);
}

#[test]
fn test_render_before_set_source_fails() {
    let cache = RenderCache::detached();
    assert_eq!(cache.render().unwrap_err(), CacheError::NoSource);
}

// ============================================================================
// Redraw Signals
// ============================================================================

#[test]
fn test_end_drag_signals_redraw() {
    let (mut cache, redraws) = counted_cache();
    publish(&mut cache, &[0; 4], SourceRect::tight(2, 2));

    cache.begin_drag().unwrap();
    assert_eq!(*redraws.borrow(), 0);
    cache.end_drag();
    assert_eq!(*redraws.borrow(), 1);
}

#[test]
fn test_idle_update_signals_redraw_but_mid_drag_update_stays_silent() {
    let (mut cache, redraws) = counted_cache();
    publish(&mut cache, &[0; 4], SourceRect::tight(2, 2));

    cache.notify_update();
    assert_eq!(*redraws.borrow(), 1);

    cache.begin_drag().unwrap();
    cache.notify_update();
    cache.notify_update();
    assert_eq!(*redraws.borrow(), 1);

    cache.end_drag();
    assert_eq!(*redraws.borrow(), 2);
}
