use crate::auth::{login, use_auth};
use crate::components::icons::Sparkles;
use crate::notify::use_notify;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let notify = use_notify();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match login(&auth, email.get_untracked(), password.get_untracked()).await {
                Ok(()) => {
                    // Navigation to the dashboard happens reactively once the
                    // auth signal flips; nothing more to do here.
                    notify.success("Welcome back!");
                }
                Err(err) => {
                    web_sys::console::warn_1(&format!("[Auth] login failed: {}", err).into());
                    set_error_msg.set(Some("Invalid email or password.".to_string()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let go_signup = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate("/signup");
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Sparkles attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome Back"</h1>
                        <p class="text-base-content/70">
                            "Sign in to analyze your resume against any job"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing In..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm text-base-content/70 mt-4">
                            "Don't have an account? "
                            <a href="/signup" class="link link-primary font-medium" on:click=go_signup>
                                "Sign Up"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
