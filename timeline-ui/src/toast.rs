//! Hàng đợi thông báo ngắn (toast) hiển thị sau mỗi thao tác.

/// Số toast tối đa hiển thị cùng lúc.
pub const TOAST_LIMIT: usize = 3;
/// Thời gian (ms) trước khi toast tự đóng.
pub const TOAST_DURATION_MS: i32 = 4_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastList {
    items: Vec<Toast>,
}

impl ToastList {
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    /// Thêm toast mới; toast cũ nhất bị đẩy ra khi vượt giới hạn.
    pub fn push(&mut self, toast: Toast) {
        self.items.push(toast);
        if self.items.len() > TOAST_LIMIT {
            let overflow = self.items.len() - TOAST_LIMIT;
            self.items.drain(..overflow);
        }
    }

    pub fn dismiss(&mut self, id: u32) {
        self.items.retain(|toast| toast.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u32) -> Toast {
        Toast {
            id,
            title: format!("Toast {id}"),
            description: String::new(),
            destructive: false,
        }
    }

    #[test]
    fn oldest_toasts_are_dropped_past_limit() {
        let mut list = ToastList::default();
        for id in 0..5 {
            list.push(toast(id));
        }
        let ids: Vec<u32> = list.items().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn dismiss_removes_only_matching_toast() {
        let mut list = ToastList::default();
        list.push(toast(1));
        list.push(toast(2));
        list.dismiss(1);
        list.dismiss(42);
        assert_eq!(list.items(), &[toast(2)]);
    }
}
