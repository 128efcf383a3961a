use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::notify::use_notify;
use crate::protocol::{AnalysisHistoryItem, AnalysisResponse, is_supported_resume_name};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use wasm_bindgen_futures::JsFuture;

/// "已复制"标记恢复原状的延时
const COPIED_RESET_DELAY: Duration = Duration::from_secs(2);

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();

    let (job_description, set_job_description) = signal(String::new());
    let file_input = NodeRef::<html::Input>::new();

    let (analyzing, set_analyzing) = signal(false);
    let (result, set_result) = signal(Option::<AnalysisResponse>::None);

    let (history, set_history) = signal(Vec::<AnalysisHistoryItem>::new());
    let (loading_history, set_loading_history) = signal(false);

    let load_history = move || {
        let api = auth.state.get_untracked().api;
        set_loading_history.set(true);
        spawn_local(async move {
            match api.history().await {
                Ok(items) => set_history.set(items),
                Err(e) => {
                    // 历史记录加载失败不打断面板其余功能
                    web_sys::console::warn_1(
                        &format!("[Dashboard] history load failed: {}", e).into(),
                    );
                }
            }
            set_loading_history.set(false);
        });
    };

    // 进入面板后加载历史记录
    Effect::new(move |_| {
        if auth.state.get().token.is_some() {
            load_history();
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let jd = job_description.get_untracked();
        let file = file_input
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        // 前置校验：两个输入都齐备才会发起请求
        let Some(file) = file else {
            notify.error("Please provide a resume and job description.");
            return;
        };
        if jd.trim().is_empty() {
            notify.error("Please provide a resume and job description.");
            return;
        }
        if !is_supported_resume_name(&file.name()) {
            notify.error("Unsupported file type. Upload a .pdf or .docx resume.");
            return;
        }

        // 提交按钮在请求完成前保持禁用，保证响应按提交顺序生效
        set_analyzing.set(true);
        let api = auth.state.get_untracked().api;
        spawn_local(async move {
            match api.analyze(&jd, &file).await {
                Ok(analysis) => {
                    set_result.set(Some(analysis));
                    notify.success("Analysis complete!");
                    load_history();
                }
                Err(e) => {
                    // 失败不清除上一次成功的结果
                    web_sys::console::warn_1(&format!("[Dashboard] analysis failed: {}", e).into());
                    notify.error("Analysis failed. Please check your file and try again.");
                }
            }
            set_analyzing.set(false);
        });
    };

    let on_logout = move |_| logout(&auth);

    view! {
        <div class="min-h-screen bg-base-200 flex flex-col font-sans">
            <div class="navbar bg-base-100 shadow-sm sticky top-0 z-10">
                <div class="flex-1 gap-2 px-2">
                    <Sparkles attr:class="h-6 w-6 text-primary" />
                    <span class="text-xl font-bold">"Resume AI"</span>
                </div>
                <div class="flex-none">
                    <button on:click=on_logout class="btn btn-ghost btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </div>
            </div>

            <main class="flex-grow max-w-6xl mx-auto py-12 px-4 w-full space-y-12">
                <div class="text-center">
                    <h2 class="text-4xl font-extrabold">"Get Your Instant Analysis"</h2>
                    <p class="mt-3 text-lg text-base-content/70">
                        "Upload your resume and a job description to see how you match up."
                    </p>
                </div>

                <div class="card bg-base-100 shadow-2xl">
                    <form class="card-body grid grid-cols-1 md:grid-cols-2 gap-8 items-start" on:submit=on_submit>
                        <div class="form-control w-full">
                            <label class="label" for="job_description">
                                <span class="label-text flex items-center gap-2 text-lg font-semibold">
                                    <Briefcase attr:class="h-5 w-5" /> "Job Description"
                                </span>
                            </label>
                            <textarea
                                id="job_description"
                                class="textarea textarea-bordered w-full h-64"
                                placeholder="Paste the full job description here..."
                                prop:value=job_description
                                on:input=move |ev| set_job_description.set(event_target_value(&ev))
                            ></textarea>
                        </div>
                        <div class="space-y-6">
                            <div class="form-control w-full">
                                <label class="label" for="resume_file">
                                    <span class="label-text flex items-center gap-2 text-lg font-semibold">
                                        <FileText attr:class="h-5 w-5" /> "Your Resume"
                                    </span>
                                </label>
                                <input
                                    id="resume_file"
                                    type="file"
                                    accept=".pdf,.docx"
                                    class="file-input file-input-bordered w-full"
                                    node_ref=file_input
                                />
                            </div>
                            <button type="submit" disabled=move || analyzing.get() class="btn btn-primary btn-lg w-full gap-2">
                                {move || if analyzing.get() {
                                    view! { <span class="loading loading-spinner"></span> "Analyzing..." }.into_any()
                                } else {
                                    view! { <BotMessageSquare attr:class="h-6 w-6" /> "Analyze Now" }.into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                // 结果区：仅在有成功结果时渲染，失败时保留上一次的结果
                {move || result.get().map(|analysis| view! {
                    <div class="space-y-8">
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body items-center text-center">
                                <h3 class="card-title">"Match Score"</h3>
                                <p class="text-6xl font-bold text-primary">{analysis.formatted_score()}</p>
                            </div>
                        </div>
                        <div class="grid md:grid-cols-2 gap-8">
                            <ResultCard
                                title="Missing Skills"
                                icon=view! { <Briefcase attr:class="h-6 w-6 text-primary" /> }.into_any()
                                items=analysis.missing_skills.clone()
                            />
                            <ResultCard
                                title="Resume Suggestions"
                                icon=view! { <FileText attr:class="h-6 w-6 text-primary" /> }.into_any()
                                items=analysis.resume_suggestions.clone()
                            />
                        </div>
                        <CoverLetterCard text=analysis.generated_cover_letter.clone() />
                    </div>
                })}

                <HistoryPanel
                    history=history
                    loading=loading_history
                    on_refresh=Callback::new(move |_: ()| load_history())
                />
            </main>

            <footer class="py-8">
                <p class="text-center text-sm text-base-content/40">
                    "Resume AI. All rights reserved."
                </p>
            </footer>
        </div>
    }
}

/// 列表型结果卡片（缺失技能、简历建议）
#[component]
fn ResultCard(title: &'static str, icon: AnyView, items: Vec<String>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center gap-3">
                    {icon}
                    <h3 class="card-title">{title}</h3>
                </div>
                <ul class="space-y-2 mt-2">
                    {items
                        .into_iter()
                        .map(|item| view! {
                            <li class="flex items-start gap-3 text-base-content/80">
                                <span class="text-primary font-bold">"\u{25aa}"</span>
                                <span>{item}</span>
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}

/// 求职信卡片，带复制到剪贴板的操作
#[component]
fn CoverLetterCard(text: String) -> impl IntoView {
    let notify = use_notify();
    let (copied, set_copied) = signal(false);
    let (copy_seq, set_copy_seq) = signal(0u32);

    let payload = text.clone();
    let on_copy = move |_| {
        let seq = copy_seq.get_untracked() + 1;
        set_copy_seq.set(seq);

        let to_write = payload.clone();
        spawn_local(async move {
            if let Some(window) = web_sys::window() {
                let promise = window.navigator().clipboard().write_text(&to_write);
                let _ = JsFuture::from(promise).await;
            }
        });

        notify.success("Copied to clipboard!");
        set_copied.set(true);
        // 固定延时后恢复图标；连续点击时以最后一次的定时器为准
        set_timeout(
            move || {
                if copy_seq.get_untracked() == seq {
                    set_copied.set(false);
                }
            },
            COPIED_RESET_DELAY,
        );
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <div class="flex items-center gap-3">
                        <BotMessageSquare attr:class="h-6 w-6 text-primary" />
                        <h3 class="card-title">"Generated Cover Letter"</h3>
                    </div>
                    <button
                        class="btn btn-ghost btn-sm btn-square"
                        title="Copy to Clipboard"
                        on:click=on_copy
                    >
                        {move || if copied.get() {
                            view! { <Check attr:class="h-4 w-4 text-success" /> }.into_any()
                        } else {
                            view! { <Copy attr:class="h-4 w-4" /> }.into_any()
                        }}
                    </button>
                </div>
                <pre class="whitespace-pre-wrap font-sans text-sm bg-base-200 p-4 rounded-box mt-2">{text}</pre>
            </div>
        </div>
    }
}

/// 历史分析记录面板
#[component]
fn HistoryPanel(
    history: ReadSignal<Vec<AnalysisHistoryItem>>,
    loading: ReadSignal<bool>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    let is_empty = move || history.with(|h| h.is_empty());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <div>
                        <h3 class="card-title">"Past Analyses"</h3>
                        <p class="text-base-content/70 text-sm">"Your previous results, newest first."</p>
                    </div>
                    <button
                        on:click=move |_| on_refresh.run(())
                        disabled=move || loading.get()
                        class="btn btn-ghost btn-circle"
                    >
                        <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                </div>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Analyzed At"</th>
                                <th>"Match Score"</th>
                                <th class="hidden md:table-cell">"Missing Skills"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || is_empty() && !loading.get()>
                                <tr>
                                    <td colspan="3" class="text-center py-8 text-base-content/50">
                                        "No analyses yet. Your results will appear here."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || is_empty() && loading.get()>
                                <tr>
                                    <td colspan="3" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || history.get()
                                key=|item| item.id.clone()
                                children=move |item| {
                                    view! {
                                        <tr>
                                            <td class="font-mono text-sm">
                                                {item.analyzed_at.format("%Y-%m-%d %H:%M").to_string()}
                                            </td>
                                            <td class="font-bold text-primary">
                                                {crate::protocol::format_match_score(item.match_score)}
                                            </td>
                                            <td class="hidden md:table-cell text-sm opacity-70">
                                                {item.missing_skills.join(", ")}
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
