//! Sign-In Page
//!
//! Centred shell around the login form.

use leptos::*;
use leptos_meta::{Meta, Title};
use palour::pages::Page;

use crate::components::LoginForm;

#[component]
pub fn SignIn() -> impl IntoView {
    let meta = Page::SignIn.meta();

    view! {
        <Title text=meta.title />
        <Meta name="description" content=meta.description />

        <div class="flex min-h-svh flex-col items-center justify-center gap-6 bg-zinc-50 p-6 md:p-10">
            <div class="w-full max-w-sm">
                <LoginForm />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{count, mount_fixture};
    use leptos_meta::provide_meta_context;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_sign_in_renders_one_login_form() {
        let host = mount_fixture(|| {
            provide_meta_context();
            view! { <SignIn /> }
        });

        assert_eq!(count(&host, "form"), 1);
        assert_eq!(count(&host, "input[type=\"email\"]"), 1);
        assert_eq!(count(&host, "input[type=\"password\"]"), 1);
        host.remove();
    }
}
