//! Login Form Component
//!
//! Email and password fields with a submit button. Credential checks and
//! session handling belong to the authentication service, not this form.

use leptos::*;

#[component]
pub fn LoginForm() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        web_sys::console::log_1(&format!("Sign-in submitted for {}", email.get_untracked()).into());
    };

    view! {
        <form class="flex flex-col gap-6" on:submit=on_submit>
            <div class="flex flex-col items-center gap-2 text-center">
                <h1 class="text-2xl font-bold">"Login to your account"</h1>
                <p class="text-sm text-zinc-500">
                    "Enter your email below to login to your account"
                </p>
            </div>

            <div class="grid gap-6">
                <div class="grid gap-2">
                    <label for="email" class="text-sm font-medium">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        placeholder="m@example.com"
                        required
                        class="h-9 rounded-md border px-3 text-sm"
                        prop:value=email
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </div>
                <div class="grid gap-2">
                    <label for="password" class="text-sm font-medium">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        required
                        class="h-9 rounded-md border px-3 text-sm"
                        prop:value=password
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </div>
                <button
                    type="submit"
                    class="h-9 rounded-md bg-zinc-900 text-sm font-medium text-white hover:bg-zinc-800"
                >
                    "Login"
                </button>
            </div>
        </form>
    }
}
