//! Expand/collapse interaction state machines
//!
//! One state machine per expandable node, all driven through a single
//! controller. Timing (hover debounce, post-collapse hiding) runs through a
//! deterministic scheduler of cancellable tasks keyed by node id; the host
//! advances the clock and applies the emitted DOM patches.

use std::time::Duration;

/// Delay before a collapsed submenu is hidden from interactive reach,
/// matching the collapse transition length.
pub const COLLAPSE_HIDE_MS: u64 = 300;

/// Shorter hide delay when a node collapses itself on click.
pub const CLICK_SELF_HIDE_MS: u64 = 150;

/// Default hover debounce.
pub const DEFAULT_HOVER_DELAY_MS: u64 = 250;

/// Chosen once per render pass, for every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Click,
    Hover,
}

impl InteractionMode {
    /// Embedded frames cannot use hover menus reliably, so they force click.
    pub fn choose(embedded: bool, force_click: bool) -> Self {
        if embedded || force_click {
            InteractionMode::Click
        } else {
            InteractionMode::Hover
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Collapsed,
    Expanded,
}

/// Pointer and activation events fed in by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// Primary control activated (click mode)
    Activate(i64),
    /// Pointer entered the node's anchor (hover mode)
    PointerEnter(i64),
    /// Pointer left the node's anchor (hover mode)
    PointerLeave(i64),
    /// Pointer entered the open submenu (hover mode)
    SubmenuEnter(i64),
    /// Pointer left the open submenu (hover mode)
    SubmenuLeave(i64),
}

/// Effects for the host to apply to the emitted DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomPatch {
    /// Add `.expanded`, make the submenu visible, raise max-height/opacity
    SubmenuExpanded { node: i64 },
    /// Remove `.expanded`, zero max-height/opacity
    SubmenuCollapsed { node: i64 },
    /// Set `visibility: hidden` once the collapse transition is over
    SubmenuHidden { node: i64 },
    /// Rotate the dropdown indicator; 0 resets it
    IndicatorRotated { node: i64, degrees: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskKind {
    HoverExpand,
    HoverCollapse,
    HideAfterCollapse,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    node: i64,
    kind: TaskKind,
    due: Duration,
    seq: u64,
}

/// Cancellable task queue over a manually advanced clock.
#[derive(Debug, Default)]
struct Scheduler {
    now: Duration,
    next_seq: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    /// Schedule, replacing any pending task of the same node and kind.
    fn schedule(&mut self, node: i64, kind: TaskKind, delay: Duration) {
        self.cancel(node, kind);
        self.tasks.push(ScheduledTask {
            node,
            kind,
            due: self.now + delay,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    fn cancel(&mut self, node: i64, kind: TaskKind) {
        self.tasks.retain(|t| !(t.node == node && t.kind == kind));
    }

    fn advance(&mut self, delta: Duration) -> Vec<(i64, TaskKind)> {
        self.now += delta;
        let now = self.now;
        let mut due: Vec<ScheduledTask> = self
            .tasks
            .iter()
            .copied()
            .filter(|t| t.due <= now)
            .collect();
        self.tasks.retain(|t| t.due > now);
        due.sort_by_key(|t| (t.due, t.seq));
        due.into_iter().map(|t| (t.node, t.kind)).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct NodeEntry {
    id: i64,
    /// Nesting tier, 1-based; "one open branch per tier" is enforced per tier
    tier: usize,
    state: NodeState,
}

/// The interaction controller for one render pass.
#[derive(Debug)]
pub struct MenuInteraction {
    mode: InteractionMode,
    hover_delay: Duration,
    nodes: Vec<NodeEntry>,
}

impl MenuInteraction {
    pub fn new(mode: InteractionMode, hover_delay: Duration) -> (Self, InteractionClock) {
        (
            Self {
                mode,
                hover_delay,
                nodes: Vec::new(),
            },
            InteractionClock {
                scheduler: Scheduler::default(),
            },
        )
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Register an expandable node. Called by the renderer.
    pub fn register(&mut self, id: i64, tier: usize) {
        if self.entry(id).is_none() {
            self.nodes.push(NodeEntry {
                id,
                tier,
                state: NodeState::Collapsed,
            });
        }
    }

    pub fn state(&self, id: i64) -> Option<NodeState> {
        self.entry(id).map(|n| n.state)
    }

    pub fn expanded_at_tier(&self, tier: usize) -> Vec<i64> {
        self.nodes
            .iter()
            .filter(|n| n.tier == tier && n.state == NodeState::Expanded)
            .map(|n| n.id)
            .collect()
    }

    /// Feed one event; returns the patches to apply now. Delayed effects go
    /// through `clock.advance`.
    pub fn handle(&mut self, event: MenuEvent, clock: &mut InteractionClock) -> Vec<DomPatch> {
        match (self.mode, event) {
            (InteractionMode::Click, MenuEvent::Activate(id)) => self.activate(id, clock),
            (InteractionMode::Hover, MenuEvent::PointerEnter(id))
            | (InteractionMode::Hover, MenuEvent::SubmenuEnter(id)) => {
                self.pointer_enter(id, event, clock);
                Vec::new()
            }
            (InteractionMode::Hover, MenuEvent::PointerLeave(id))
            | (InteractionMode::Hover, MenuEvent::SubmenuLeave(id)) => {
                self.pointer_leave(id, clock);
                Vec::new()
            }
            // Events for the other mode are not wired up in the DOM; ignore
            // them rather than guessing.
            _ => Vec::new(),
        }
    }

    /// Advance the clock; due tasks fire as patches.
    pub fn advance(&mut self, delta: Duration, clock: &mut InteractionClock) -> Vec<DomPatch> {
        let mut patches = Vec::new();
        for (id, kind) in clock.scheduler.advance(delta) {
            match kind {
                TaskKind::HoverExpand => {
                    if self.state(id) == Some(NodeState::Collapsed) {
                        self.set_state(id, NodeState::Expanded);
                        patches.extend(expand_patches(id, self.tier(id)));
                    }
                }
                TaskKind::HoverCollapse => {
                    if self.state(id) == Some(NodeState::Expanded) {
                        self.set_state(id, NodeState::Collapsed);
                        patches.extend(collapse_patches(id));
                        clock.scheduler.schedule(
                            id,
                            TaskKind::HideAfterCollapse,
                            Duration::from_millis(COLLAPSE_HIDE_MS),
                        );
                    }
                }
                TaskKind::HideAfterCollapse => {
                    if self.state(id) == Some(NodeState::Collapsed) {
                        patches.push(DomPatch::SubmenuHidden { node: id });
                    }
                }
            }
        }
        patches
    }

    fn activate(&mut self, id: i64, clock: &mut InteractionClock) -> Vec<DomPatch> {
        let Some(entry) = self.entry(id) else {
            return Vec::new();
        };
        let (tier, state) = (entry.tier, entry.state);
        let mut patches = Vec::new();

        match state {
            NodeState::Collapsed => {
                // At most one open branch per tier: close the others first.
                for other in self.expanded_at_tier(tier) {
                    if other == id {
                        continue;
                    }
                    self.set_state(other, NodeState::Collapsed);
                    patches.extend(collapse_patches(other));
                    clock.scheduler.schedule(
                        other,
                        TaskKind::HideAfterCollapse,
                        Duration::from_millis(COLLAPSE_HIDE_MS),
                    );
                }
                self.set_state(id, NodeState::Expanded);
                clock.scheduler.cancel(id, TaskKind::HideAfterCollapse);
                patches.extend(expand_patches(id, tier));
            }
            NodeState::Expanded => {
                self.set_state(id, NodeState::Collapsed);
                patches.extend(collapse_patches(id));
                clock.scheduler.schedule(
                    id,
                    TaskKind::HideAfterCollapse,
                    Duration::from_millis(CLICK_SELF_HIDE_MS),
                );
            }
        }
        patches
    }

    fn pointer_enter(&mut self, id: i64, event: MenuEvent, clock: &mut InteractionClock) {
        if self.entry(id).is_none() {
            return;
        }
        // Re-entry cancels any pending transition for this node.
        clock.scheduler.cancel(id, TaskKind::HoverCollapse);
        clock.scheduler.cancel(id, TaskKind::HoverExpand);

        // Entering the open submenu only keeps it open; entering the anchor
        // of a collapsed node arms the expand.
        let arm_expand = matches!(event, MenuEvent::PointerEnter(_))
            && self.state(id) == Some(NodeState::Collapsed);
        if arm_expand {
            clock
                .scheduler
                .schedule(id, TaskKind::HoverExpand, self.hover_delay);
        }
    }

    fn pointer_leave(&mut self, id: i64, clock: &mut InteractionClock) {
        if self.entry(id).is_none() {
            return;
        }
        clock.scheduler.cancel(id, TaskKind::HoverExpand);
        if self.state(id) == Some(NodeState::Expanded) {
            clock
                .scheduler
                .schedule(id, TaskKind::HoverCollapse, self.hover_delay);
        }
    }

    fn entry(&self, id: i64) -> Option<&NodeEntry> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn tier(&self, id: i64) -> usize {
        self.entry(id).map(|n| n.tier).unwrap_or(1)
    }

    fn set_state(&mut self, id: i64, state: NodeState) {
        if let Some(entry) = self.nodes.iter_mut().find(|n| n.id == id) {
            entry.state = state;
        }
    }
}

/// Pending timers, kept apart from the node registry so `handle` can borrow
/// both mutably.
#[derive(Debug, Default)]
pub struct InteractionClock {
    scheduler: Scheduler,
}

impl InteractionClock {
    pub fn pending(&self) -> usize {
        self.scheduler.tasks.len()
    }
}

/// Indicator rotation per tier; tier 3 uses a plain dot with no rotation.
pub fn indicator_rotation(tier: usize) -> Option<u16> {
    match tier {
        1 => Some(180),
        2 => Some(90),
        _ => None,
    }
}

fn expand_patches(id: i64, tier: usize) -> Vec<DomPatch> {
    let mut patches = vec![DomPatch::SubmenuExpanded { node: id }];
    if let Some(degrees) = indicator_rotation(tier) {
        patches.push(DomPatch::IndicatorRotated { node: id, degrees });
    }
    patches
}

fn collapse_patches(id: i64) -> Vec<DomPatch> {
    vec![
        DomPatch::SubmenuCollapsed { node: id },
        DomPatch::IndicatorRotated { node: id, degrees: 0 },
    ]
}
