use std::ops::{Index, IndexMut};

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Free-list arena. Erased slots are recycled by later inserts, and each
/// erase bumps the slot generation so stale handles can be detected.
#[derive(Clone, Debug)]
pub(crate) struct List<T> {
    data: Vec<Slot<T>>,
    elements: usize,
    vacant: Vec<usize>,
}

impl<T> List<T> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            elements: 0,
            vacant: Vec::new(),
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.elements
    }

    /// Generation of the slot at `index`, whether occupied or not.
    pub(crate) fn generation(&self, index: usize) -> u32 {
        self.data.get(index).map_or(0, |slot| slot.generation)
    }

    pub(crate) fn get(&self, index: usize, generation: u32) -> Option<&T> {
        self.data
            .get(index)
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub(crate) fn get_mut(&mut self, index: usize, generation: u32) -> Option<&mut T> {
        self.data
            .get_mut(index)
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Stores `element`, reusing the most recently erased slot if there is one.
    pub(crate) fn insert(&mut self, element: T) -> usize {
        self.elements += 1;
        if let Some(index) = self.vacant.pop() {
            self.data[index].value = Some(element);
            return index;
        }
        self.data.push(Slot {
            generation: 0,
            value: Some(element),
        });
        self.data.len() - 1
    }

    /// Frees the slot at `index`, returning its element.
    pub(crate) fn erase(&mut self, index: usize) -> Option<T> {
        let slot = self.data.get_mut(index)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.elements -= 1;
        self.vacant.push(index);
        Some(value)
    }
}

impl<T> Index<usize> for List<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.data.get(index).and_then(|slot| slot.value.as_ref()) {
            Some(value) => value,
            None => panic!("list slot {index} is vacant"),
        }
    }
}

impl<T> IndexMut<usize> for List<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.data.get_mut(index).and_then(|slot| slot.value.as_mut()) {
            Some(value) => value,
            None => panic!("list slot {index} is vacant"),
        }
    }
}
