use super::model::{Comment, CommentThread};
use crate::items::model::ItemId;

/// 댓글 슬라이스
///
/// 상품 화면에 들어올 때마다 새로 받아온다. 증분 동기화는 하지 않는다.
#[derive(Debug, Clone, Default)]
pub struct CommentsState {
    pub item_id: Option<ItemId>,
    pub list: Vec<Comment>,
    pub error: Option<String>,
}

impl CommentsState {
    pub fn threads(&self) -> Vec<CommentThread> {
        thread(&self.list)
    }

    pub fn find(&self, comment_id: i64) -> Option<&Comment> {
        self.list.iter().find(|c| c.id == comment_id)
    }

    pub(crate) fn list_loaded(&mut self, item_id: ItemId, comments: Vec<Comment>) {
        self.item_id = Some(item_id);
        self.list = comments;
    }

    /// 현재 화면의 상품 댓글이면 목록 끝에 붙인다.
    pub(crate) fn posted(&mut self, comment: Comment) {
        if self.item_id != Some(comment.item_id) {
            return;
        }
        if !self.list.iter().any(|c| c.id == comment.id) {
            self.list.push(comment);
        }
    }

    pub(crate) fn clear(&mut self, item_id: ItemId) {
        if self.item_id == Some(item_id) {
            *self = CommentsState::default();
        }
    }
}

/// 평평한 댓글 목록을 최상위 댓글 + 답글 묶음으로 정리한다.
///
/// 답글의 답글도 최상위 댓글 아래에 붙인다. 부모를 찾을 수 없는 답글은 최상위로 올린다.
pub fn thread(comments: &[Comment]) -> Vec<CommentThread> {
    let mut sorted: Vec<&Comment> = comments.iter().collect();
    sorted.sort_by_key(|c| (c.created_at, c.id));

    let root_of = |comment: &Comment| -> Option<i64> {
        let mut parent = comment.parent_id?;
        // 한 단계 스레드이므로 깊이는 댓글 수를 넘지 않는다
        for _ in 0..comments.len() {
            match comments.iter().find(|c| c.id == parent) {
                Some(found) => match found.parent_id {
                    Some(next) => parent = next,
                    None => return Some(found.id),
                },
                None => return None,
            }
        }
        None
    };

    let mut threads: Vec<CommentThread> = sorted
        .iter()
        .filter(|c| !c.is_reply() || root_of(**c).is_none())
        .map(|c| CommentThread {
            root: (*c).clone(),
            replies: Vec::new(),
        })
        .collect();

    for reply in sorted.iter().filter(|c| c.is_reply()) {
        if let Some(root_id) = root_of(*reply) {
            if let Some(thread) = threads.iter_mut().find(|t| t.root.id == root_id) {
                thread.replies.push((*reply).clone());
            }
        }
    }

    threads
}
