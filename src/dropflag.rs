//! This module is for testing only

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type DropFlag<T> = Rc<RefCell<T>>;

/// Tallies of what happened to `Tracked` values sharing one `DropFlag`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub created: usize,
    pub cloned: usize,
    pub dropped: usize,
}

impl Tally {
    pub fn live(&self) -> usize {
        self.created + self.cloned - self.dropped
    }
}

/// Element type that records creation, cloning and dropping.
#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    pub tally: DropFlag<Tally>,
}

impl Tracked {
    pub fn new(value: i32, tally: &DropFlag<Tally>) -> Tracked {
        tally.borrow_mut().created += 1;
        Tracked { value, tally: tally.clone() }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.tally.borrow_mut().cloned += 1;
        Tracked { value: self.value, tally: self.tally.clone() }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.tally.borrow_mut().dropped += 1;
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

thread_local! {
    static LIVE: Cell<isize> = Cell::new(0);
    static CLONE_FUSE: Cell<Option<usize>> = Cell::new(None);
}

/// Element type counting live instances per thread. Supports `Default`,
/// and its `clone` can be armed to panic.
#[derive(Debug, PartialEq, PartialOrd)]
pub struct Live(i32);

impl Live {
    pub fn new(value: i32) -> Live {
        LIVE.with(|live| live.set(live.get() + 1));
        Live(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Number of `Live` values currently alive on this thread.
    pub fn count() -> isize {
        LIVE.with(|live| live.get())
    }

    /// Lets `successes` more clones through, then panics on the next one.
    pub fn arm_clone_fuse(successes: usize) {
        CLONE_FUSE.with(|fuse| fuse.set(Some(successes)));
    }
}

impl Default for Live {
    fn default() -> Self {
        Live::new(0)
    }
}

impl Clone for Live {
    fn clone(&self) -> Self {
        CLONE_FUSE.with(|fuse| match fuse.get() {
            Some(0) => {
                fuse.set(None);
                panic!("clone fuse blew");
            }
            Some(n) => fuse.set(Some(n - 1)),
            None => {}
        });
        Live::new(self.0)
    }
}

impl Drop for Live {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}

#[test]
fn dropflag() {
    let tally = DropFlag::new(RefCell::new(Tally::default()));
    let first = Tracked::new(1, &tally);
    let second = first.clone();
    assert_eq!(2, tally.borrow().live());
    std::mem::drop(first);
    std::mem::drop(second);
    assert_eq!(Tally { created: 1, cloned: 1, dropped: 2 }, *tally.borrow());
}

#[test]
fn live_counter_and_fuse() {
    let before = Live::count();
    let a = Live::new(3);
    Live::arm_clone_fuse(1);
    let b = a.clone();
    let blown = std::panic::catch_unwind(|| a.clone());
    assert!(blown.is_err());
    assert_eq!(before + 2, Live::count());
    drop((a, b));
    assert_eq!(before, Live::count());
}
