/// Counts constructed slots and writes the count back to the owner's length
/// when dropped, unwinding included.
///
/// While the guard lives the owner's `len` is borrowed, so nothing else can
/// observe the half-filled state. If a constructor panics, the slots built
/// so far are still counted as live and get dropped exactly once later.
pub(crate) struct FillGuard<'a> {
    len: &'a mut usize,
    local_len: usize,
}

impl<'a> FillGuard<'a> {
    #[inline(always)]
    pub fn new(len: &'a mut usize) -> FillGuard<'a> {
        let local_len = *len;
        FillGuard { len, local_len }
    }

    /// Index of the next slot to construct.
    #[inline(always)]
    pub fn current(&self) -> usize {
        self.local_len
    }

    /// Marks the slot at `current()` as constructed.
    #[inline(always)]
    pub fn commit_one(&mut self) {
        self.local_len += 1;
    }
}

impl<'a> Drop for FillGuard<'a> {
    fn drop(&mut self) {
        *self.len = self.local_len;
    }
}
