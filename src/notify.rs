//! 全局通知模块
//!
//! 以 Context 形式提供的瞬态提示：任何页面都可以发出一条消息，
//! 由挂在应用根部的 `NoticeToast` 统一渲染，固定延时后自动消失。
//! 提示挂在路由出口之外，因此能跨越路由切换存活
//! （注册成功后跳转到登录页时提示仍然可见）。

use leptos::prelude::*;
use std::time::Duration;

/// 提示自动消失的延时
const NOTICE_TTL: Duration = Duration::from_secs(3);

/// 一条用户可见的提示消息
#[derive(Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
    /// 自增序号，清除定时器据此判断自己是否已被更新的消息取代
    seq: u64,
}

/// 通知上下文
#[derive(Clone, Copy)]
pub struct NotifyContext {
    notice: ReadSignal<Option<Notice>>,
    set_notice: WriteSignal<Option<Notice>>,
    counter: StoredValue<u64>,
}

impl NotifyContext {
    pub fn new() -> Self {
        let (notice, set_notice) = signal(Option::<Notice>::None);
        Self {
            notice,
            set_notice,
            counter: StoredValue::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message.into(), false);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message.into(), true);
    }

    fn push(&self, message: String, is_error: bool) {
        self.counter.update_value(|c| *c += 1);
        let seq = self.counter.get_value();
        self.set_notice.set(Some(Notice {
            message,
            is_error,
            seq,
        }));

        // 固定延时后清除；期间若有新消息，则交由新消息的定时器接管
        let notice = self.notice;
        let set_notice = self.set_notice;
        set_timeout(
            move || {
                if notice.get_untracked().is_some_and(|n| n.seq == seq) {
                    set_notice.set(None);
                }
            },
            NOTICE_TTL,
        );
    }
}

/// 从 Context 获取通知上下文
pub fn use_notify() -> NotifyContext {
    use_context::<NotifyContext>().expect("NotifyContext should be provided")
}

/// 通知浮层，渲染当前提示
#[component]
pub fn NoticeToast() -> impl IntoView {
    let notice = use_notify().notice;

    view! {
        <Show when=move || notice.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    if notice.get().is_some_and(|n| n.is_error) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notice.get().map(|n| n.message).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}
