use crate::types::KeyNode;

/// Exchanges the keys stored at arena positions `x` and `y`.
///
/// Links are left untouched, so the caller is responsible for the ordering
/// invariant still holding afterwards.
pub fn swap_keys<K, N: KeyNode<K>>(arena: &mut [N], x: u32, y: u32) {
    let (x, y) = (x as usize, y as usize);
    if x == y {
        return;
    }
    let (lo, hi) = if x < y { (x, y) } else { (y, x) };
    let (head, tail) = arena.split_at_mut(hi);
    std::mem::swap(head[lo].key_mut(), tail[0].key_mut());
}
