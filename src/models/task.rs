use serde::{Deserialize, Serialize};

/// A to-do item, stored exactly as persisted: `{"id":…,"text":…,"completed":…}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Creation timestamp in milliseconds, unique within a list
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

/// Ordered task list. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a task. Returns `None` (and changes nothing) when `text` is blank.
    pub fn add(&mut self, text: &str, now_ms: i64) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_id(now_ms);
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        self.tasks.last()
    }

    /// Flip the completed flag. Returns false if no task has `id`.
    pub fn toggle(&mut self, id: i64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Set the completed flag. Returns false if no task has `id`.
    pub fn set_completed(&mut self, id: i64, completed: bool) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = completed;
                true
            }
            None => false,
        }
    }

    /// Remove the task with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Remove every completed task, returning how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        before - self.tasks.len()
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    // Timestamps can repeat within a millisecond; keep ids strictly increasing
    fn next_id(&self, now_ms: i64) -> i64 {
        match self.tasks.iter().map(|t| t.id).max() {
            Some(last) if now_ms <= last => last
                .checked_add(1)
                .unwrap_or_else(|| self.free_id_at_or_below(now_ms)),
            _ => now_ms,
        }
    }

    // Only reached when the list already holds i64::MAX
    fn free_id_at_or_below(&self, start: i64) -> i64 {
        let mut id = start;
        while id > i64::MIN && self.get(id).is_some() {
            id -= 1;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(texts: &[&str]) -> TaskList {
        let mut list = TaskList::new();
        for (i, text) in texts.iter().enumerate() {
            list.add(text, 1_000 + i as i64);
        }
        list
    }

    #[test]
    fn test_add_blank_is_ignored() {
        let mut list = TaskList::new();
        assert!(list.add("", 1).is_none());
        assert!(list.add("   ", 2).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_trims_and_starts_active() {
        let mut list = TaskList::new();
        let task = list.add("  Buy milk ", 1_700_000_000_000).unwrap().clone();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.id, 1_700_000_000_000);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut list = TaskList::new();
        let a = list.add("a", 500).unwrap().id;
        let b = list.add("b", 500).unwrap().id;
        let c = list.add("c", 400).unwrap().id;
        assert_eq!((a, b, c), (500, 501, 502));
    }

    #[test]
    fn test_add_after_max_id_does_not_overflow() {
        let mut list = TaskList::from_tasks(vec![Task {
            id: i64::MAX,
            text: "x".to_string(),
            completed: false,
        }]);
        let a = list.add("y", 500).unwrap().id;
        let b = list.add("z", 500).unwrap().id;
        assert_eq!((a, b), (500, 499));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut list = list_with(&["one"]);
        let id = list.tasks()[0].id;
        assert!(list.toggle(id));
        assert!(list.get(id).unwrap().completed);
        assert!(list.toggle(id));
        assert!(!list.get(id).unwrap().completed);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut list = list_with(&["one"]);
        let before = list.clone();
        assert!(!list.toggle(42));
        assert_eq!(list, before);
    }

    #[test]
    fn test_set_completed() {
        let mut list = list_with(&["one"]);
        let id = list.tasks()[0].id;
        assert!(list.set_completed(id, true));
        assert!(list.set_completed(id, true));
        assert!(list.get(id).unwrap().completed);
        assert!(!list.set_completed(7, false));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut list = list_with(&["one", "two"]);
        let id = list.tasks()[0].id;
        assert!(list.delete(id));
        let after_first = list.clone();
        assert!(!list.delete(id));
        assert_eq!(list, after_first);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_clear_completed_twice() {
        let mut list = list_with(&["one", "two", "three"]);
        let ids: Vec<i64> = list.tasks().iter().map(|t| t.id).collect();
        list.toggle(ids[0]);
        list.toggle(ids[2]);

        assert_eq!(list.clear_completed(), 2);
        let after_first = list.clone();
        assert_eq!(list.clear_completed(), 0);
        assert_eq!(list, after_first);
        assert_eq!(list.tasks()[0].text, "two");
    }

    #[test]
    fn test_active_count_and_order() {
        let mut list = list_with(&["a", "b", "c"]);
        assert_eq!(list.active_count(), 3);
        let id = list.tasks()[1].id;
        list.toggle(id);
        assert_eq!(list.active_count(), 2);
        let texts: Vec<&str> = list.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }
}
