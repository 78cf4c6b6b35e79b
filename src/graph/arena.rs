use std::ops::{Index, IndexMut};

// slot + generation, so a key to a freed slot never resolves to its next tenant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Key {
    slot: usize,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), len: 0 }
    }
}

impl<T> Arena<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn insert(&mut self, value: T) -> Key {
        self.len += 1;
        match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot];
                entry.value = Some(value);
                Key { slot, generation: entry.generation }
            }
            None => {
                self.slots.push(Slot { generation: 0, value: Some(value) });
                Key { slot: self.slots.len() - 1, generation: 0 }
            }
        }
    }

    pub fn remove(&mut self, key: Key) -> Option<T> {
        let entry = self.slots.get_mut(key.slot)?;
        if entry.generation != key.generation {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(key.slot);
        self.len -= 1;
        Some(value)
    }

    #[inline]
    pub fn get(&self, key: Key) -> Option<&T> {
        self.slots.get(key.slot).filter(|entry| entry.generation == key.generation).and_then(|entry| entry.value.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, key: Key) -> Option<&mut T> {
        self.slots.get_mut(key.slot).filter(|entry| entry.generation == key.generation).and_then(|entry| entry.value.as_mut())
    }

    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        self.get(key).is_some()
    }
}

impl<T> Index<Key> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, key: Key) -> &T {
        match self.get(key) {
            Some(value) => value,
            None => panic!("stale arena key {key:?}"),
        }
    }
}

impl<T> IndexMut<Key> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, key: Key) -> &mut T {
        match self.get_mut(key) {
            Some(value) => value,
            None => panic!("stale arena key {key:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slot_is_reused_with_new_generation() {
        let mut arena = Arena::default();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.len(), 1);

        let c = arena.insert("c");
        assert_ne!(a, c);
        assert!(!arena.contains(a));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena[c], "c");
        assert_eq!(arena[b], "b");
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.len(), 2);
    }
}
