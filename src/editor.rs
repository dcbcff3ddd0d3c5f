//! Ordered question list behind the draft being authored.
//!
//! Operations that act on "the selected question" take `Option<usize>`; `None` means
//! nothing is selected. Moves are single adjacent swaps, like list-box up/down buttons.

use tracing::{debug, instrument};

use crate::domain::{check_options, Question, QuestionKind};
use crate::error::{FormError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionListEditor {
  questions: Vec<Question>,
}

impl QuestionListEditor {
  pub fn new() -> Self { Self::default() }

  pub fn questions(&self) -> &[Question] { &self.questions }
  pub fn len(&self) -> usize { self.questions.len() }
  pub fn is_empty(&self) -> bool { self.questions.is_empty() }

  /// Append a new question and return its index.
  #[instrument(level = "debug", skip(self, text, options), fields(kind = kind.as_str()))]
  pub fn add(&mut self, kind: QuestionKind, text: &str, options: Option<Vec<String>>) -> Result<usize> {
    let q = Question::new(kind, text, options)?;
    self.questions.push(q);
    let index = self.questions.len() - 1;
    debug!(target: "form_builder", index, "question added");
    Ok(index)
  }

  /// Remove the selected question, shifting later ones left.
  pub fn remove(&mut self, selected: Option<usize>) -> Result<Question> {
    let index = self.checked(selected)?;
    Ok(self.questions.remove(index))
  }

  /// Swap the selected question with the one above it. Returns its new index,
  /// or `None` when nothing is selected or it is already first.
  pub fn move_up(&mut self, selected: Option<usize>) -> Option<usize> {
    let index = selected?;
    if index == 0 || index >= self.questions.len() {
      return None;
    }
    self.questions.swap(index - 1, index);
    Some(index - 1)
  }

  /// Swap the selected question with the one below it. Returns its new index,
  /// or `None` when nothing is selected or it is already last.
  pub fn move_down(&mut self, selected: Option<usize>) -> Option<usize> {
    let index = selected?;
    if index >= self.questions.len().saturating_sub(1) {
      return None;
    }
    self.questions.swap(index, index + 1);
    Some(index + 1)
  }

  /// Edit the selected question in place.
  ///
  /// Empty `new_text` cancels the whole edit and returns `Ok(false)`. Otherwise the text is
  /// replaced, and for multiple choice a non-empty `new_options` replaces the options.
  /// Options are ignored for other kinds.
  pub fn edit(&mut self, selected: Option<usize>, new_text: &str, new_options: Option<Vec<String>>) -> Result<bool> {
    let index = self.checked(selected)?;
    let new_text = new_text.trim();
    if new_text.is_empty() {
      return Ok(false);
    }

    let q = &mut self.questions[index];
    let new_options = new_options
      .filter(|opts| !opts.is_empty() && q.kind() == QuestionKind::MultipleChoice);
    if let Some(opts) = &new_options {
      check_options(opts)?;
    }

    q.set_text(new_text.to_string());
    if let Some(opts) = new_options {
      q.set_options(opts);
    }
    Ok(true)
  }

  pub fn clear(&mut self) {
    self.questions.clear();
  }

  /// Replace the whole list, e.g. with a loaded template's questions.
  pub fn replace_all(&mut self, questions: Vec<Question>) {
    self.questions = questions;
  }

  fn checked(&self, selected: Option<usize>) -> Result<usize> {
    match selected {
      Some(i) if i < self.questions.len() => Ok(i),
      _ => Err(FormError::Range { index: selected, len: self.questions.len() }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  fn opts(v: &[&str]) -> Option<Vec<String>> {
    Some(v.iter().map(|s| s.to_string()).collect())
  }

  fn texts(ed: &QuestionListEditor) -> Vec<&str> {
    ed.questions().iter().map(|q| q.text()).collect()
  }

  fn three() -> QuestionListEditor {
    let mut ed = QuestionListEditor::new();
    ed.add(QuestionKind::ShortAnswer, "a", None).unwrap();
    ed.add(QuestionKind::Paragraph, "b", None).unwrap();
    ed.add(QuestionKind::MultipleChoice, "c", opts(&["x", "y"])).unwrap();
    ed
  }

  #[test]
  fn test_add_returns_index() {
    let mut ed = QuestionListEditor::new();
    assert_eq!(ed.add(QuestionKind::ShortAnswer, "Name?", None).unwrap(), 0);
    assert_eq!(ed.add(QuestionKind::Paragraph, "Bio", None).unwrap(), 1);
    assert_eq!(ed.len(), 2);
  }

  #[test]
  fn test_add_invalid_leaves_list_unchanged() {
    let mut ed = three();
    let before = ed.clone();
    assert!(matches!(ed.add(QuestionKind::MultipleChoice, "Color?", opts(&[])), Err(FormError::Validation(_))));
    assert!(matches!(ed.add(QuestionKind::MultipleChoice, "Color?", None), Err(FormError::Validation(_))));
    assert!(matches!(ed.add(QuestionKind::ShortAnswer, "  ", None), Err(FormError::Validation(_))));
    assert_eq!(ed, before);
  }

  #[test]
  fn test_remove_shifts_left() {
    let mut ed = three();
    let removed = ed.remove(Some(1)).unwrap();
    assert_eq!(removed.text(), "b");
    assert_eq!(texts(&ed), ["a", "c"]);
  }

  #[test]
  fn test_remove_out_of_range_or_unselected() {
    let mut ed = three();
    assert!(matches!(ed.remove(Some(3)), Err(FormError::Range { index: Some(3), len: 3 })));
    assert!(matches!(ed.remove(None), Err(FormError::Range { index: None, .. })));
    assert_eq!(ed.len(), 3);
  }

  #[test]
  fn test_moves_are_adjacent_swaps() {
    let mut ed = three();
    assert_eq!(ed.move_down(Some(0)), Some(1));
    assert_eq!(texts(&ed), ["b", "a", "c"]);
    assert_eq!(ed.move_up(Some(2)), Some(1));
    assert_eq!(texts(&ed), ["b", "c", "a"]);
    assert_eq!(ed.len(), 3);
  }

  #[test]
  fn test_moves_at_boundaries_are_noops() {
    let mut ed = three();
    let before = ed.clone();
    assert_eq!(ed.move_up(Some(0)), None);
    assert_eq!(ed.move_down(Some(2)), None);
    assert_eq!(ed.move_up(None), None);
    assert_eq!(ed.move_down(None), None);
    assert_eq!(ed.move_up(Some(9)), None);
    assert_eq!(ed, before);

    let mut empty = QuestionListEditor::new();
    assert_eq!(empty.move_down(Some(0)), None);
  }

  #[test]
  fn test_edit_text_and_options() {
    let mut ed = three();
    assert!(ed.edit(Some(2), " Favourite? ", opts(&["p", "q", "r"])).unwrap());
    let q = &ed.questions()[2];
    assert_eq!(q.text(), "Favourite?");
    assert_eq!(q.options(), ["p", "q", "r"]);

    // Options on a non-choice question are ignored.
    assert!(ed.edit(Some(0), "A!", opts(&["z"])).unwrap());
    assert!(ed.questions()[0].options().is_empty());
  }

  #[test]
  fn test_edit_keeps_options_when_none_given() {
    let mut ed = three();
    assert!(ed.edit(Some(2), "c2", None).unwrap());
    assert!(ed.edit(Some(2), "c3", opts(&[])).unwrap());
    assert_eq!(ed.questions()[2].options(), ["x", "y"]);
    assert_eq!(ed.questions()[2].text(), "c3");
  }

  #[test]
  fn test_edit_empty_text_cancels() {
    let mut ed = three();
    let before = ed.clone();
    assert!(!ed.edit(Some(2), "   ", opts(&["new"])).unwrap());
    assert_eq!(ed, before);
  }

  #[test]
  fn test_edit_invalid_options_is_all_or_nothing() {
    let mut ed = three();
    let before = ed.clone();
    assert!(matches!(ed.edit(Some(2), "changed", opts(&["ok", ""])), Err(FormError::Validation(_))));
    assert_eq!(ed, before);
    assert!(matches!(ed.edit(Some(7), "changed", None), Err(FormError::Range { .. })));
  }

  #[test]
  fn test_clear_and_replace_all() {
    let mut ed = three();
    let snapshot = ed.questions().to_vec();
    ed.clear();
    assert!(ed.is_empty());
    ed.replace_all(snapshot.clone());
    assert_eq!(ed.questions(), snapshot.as_slice());
  }

  #[test]
  fn test_moves_with_huge_index_are_noops() {
    let mut ed = three();
    let before = ed.clone();
    assert_eq!(ed.move_down(Some(usize::MAX)), None);
    assert_eq!(ed.move_up(Some(usize::MAX)), None);
    assert!(matches!(ed.remove(Some(usize::MAX)), Err(FormError::Range { .. })));
    assert!(matches!(ed.edit(Some(usize::MAX), "x", None), Err(FormError::Range { .. })));
    assert_eq!(ed, before);

    let mut single = QuestionListEditor::new();
    single.add(QuestionKind::ShortAnswer, "a", None).unwrap();
    assert_eq!(single.move_down(Some(usize::MAX)), None);
  }

  #[derive(Clone, Debug)]
  enum Op {
    Add(String),
    Remove(Option<usize>),
    Up(Option<usize>),
    Down(Option<usize>),
  }

  fn selection() -> impl Strategy<Value = Option<usize>> {
    prop_oneof![
      Just(None),
      (0usize..8).prop_map(Some),
      Just(Some(usize::MAX)),
      any::<usize>().prop_map(Some),
    ]
  }

  fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
      "[a-z ]{0,6}".prop_map(Op::Add),
      selection().prop_map(Op::Remove),
      selection().prop_map(Op::Up),
      selection().prop_map(Op::Down),
    ]
  }

  proptest! {
    #[test]
    fn test_length_changes_only_on_add_and_remove(ops in proptest::collection::vec(op(), 0..40)) {
      let mut ed = QuestionListEditor::new();
      for op in ops {
        let before = ed.questions().to_vec();
        match &op {
          Op::Add(text) => match ed.add(QuestionKind::ShortAnswer, text, None) {
            Ok(i) => {
              prop_assert_eq!(ed.len(), before.len() + 1);
              prop_assert_eq!(i, before.len());
            }
            Err(_) => prop_assert_eq!(ed.questions(), before.as_slice()),
          },
          Op::Remove(sel) => match ed.remove(*sel) {
            Ok(_) => prop_assert_eq!(ed.len(), before.len() - 1),
            Err(_) => prop_assert_eq!(ed.questions(), before.as_slice()),
          },
          Op::Up(sel) | Op::Down(sel) => {
            let up = matches!(op, Op::Up(_));
            let moved = if up { ed.move_up(*sel) } else { ed.move_down(*sel) };
            prop_assert_eq!(ed.len(), before.len());
            match moved {
              None => prop_assert_eq!(ed.questions(), before.as_slice()),
              Some(to) => {
                let from = sel.unwrap();
                prop_assert_eq!(if up { from - 1 } else { from + 1 }, to);
                let mut expected = before.clone();
                expected.swap(from, to);
                prop_assert_eq!(ed.questions(), expected.as_slice());
              }
            }
          }
        }
      }
    }
  }
}
