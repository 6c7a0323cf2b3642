//! Unified-diff truncation for prompt budgeting.
//!
//! Large pull requests produce diffs far beyond what a completion prompt
//! should carry. Rather than cutting at an arbitrary byte offset, we keep a
//! bounded prefix of whole hunks so the model always sees complete change
//! regions.

/// Hunk budget for the completion prompt - keeps big diffs within limits.
pub const MAX_DIFF_HUNKS: usize = 15;

/// Keep at most `max_hunks` leading hunks of a unified diff.
///
/// A hunk starts at a line beginning with `@@` and runs to the next such
/// line or the end of the input; file headers between hunks of different
/// files belong to the preceding hunk's body. When the input holds fewer
/// hunks than the budget it is returned unchanged, so small diffs never see
/// any formatting drift.
pub fn truncate_hunks(diff: &str, max_hunks: usize) -> String {
    let mut hunks: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for line in diff.lines() {
        if line.starts_with("@@") {
            if let Some(done) = current.take() {
                hunks.push(done);
                if hunks.len() == max_hunks {
                    break;
                }
            }
            current = Some(format!("{line}\n"));
        } else if let Some(hunk) = current.as_mut() {
            hunk.push_str(line);
            hunk.push('\n');
        }
    }
    if let Some(done) = current {
        if hunks.len() < max_hunks {
            hunks.push(done);
        }
    }

    if hunks.len() >= max_hunks {
        hunks.concat()
    } else {
        diff.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_HUNKS: &str = "@@ -1,2 +1,2 @@\nfoo\nbar\n@@ -3,1 +3,1 @@\nbaz\n";

    #[test]
    fn keeps_small_diffs_untouched() {
        assert_eq!(truncate_hunks(TWO_HUNKS, 20), TWO_HUNKS);
    }

    #[test]
    fn returns_input_without_hunks_unchanged() {
        let plain = "no hunk markers anywhere\njust text\n";
        assert_eq!(truncate_hunks(plain, 5), plain);
    }

    #[test]
    fn truncates_to_exact_budget() {
        assert_eq!(truncate_hunks(TWO_HUNKS, 1), "@@ -1,2 +1,2 @@\nfoo\nbar\n");
    }

    #[test]
    fn keeps_hunks_in_original_order() {
        let diff = "@@ -1 +1 @@\na\n@@ -2 +2 @@\nb\n@@ -3 +3 @@\nc\n";
        assert_eq!(truncate_hunks(diff, 2), "@@ -1 +1 @@\na\n@@ -2 +2 @@\nb\n");
    }

    #[test]
    fn drops_file_preamble_only_when_truncation_engages() {
        let diff = "diff --git a/x b/x\nindex 1..2 100644\n--- a/x\n+++ b/x\n@@ -1 +1 @@\n-a\n+b\n@@ -5 +5 @@\n-c\n+d\n";

        // Below the budget: identity, preamble and all.
        assert_eq!(truncate_hunks(diff, 3), diff);

        // At the budget: only whole hunks survive.
        assert_eq!(truncate_hunks(diff, 1), "@@ -1 +1 @@\n-a\n+b\n");
    }

    #[test]
    fn inter_file_headers_stay_with_the_preceding_hunk() {
        let diff = "@@ -1 +1 @@\n-a\n+b\ndiff --git a/y b/y\n--- a/y\n+++ b/y\n@@ -1 +1 @@\n-c\n+d\n";
        assert_eq!(
            truncate_hunks(diff, 1),
            "@@ -1 +1 @@\n-a\n+b\ndiff --git a/y b/y\n--- a/y\n+++ b/y\n"
        );
    }

    #[test]
    fn is_idempotent_on_its_own_output() {
        let once = truncate_hunks(TWO_HUNKS, 1);
        assert_eq!(truncate_hunks(&once, 1), once);
    }
}
