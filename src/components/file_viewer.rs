use leptos::prelude::*;

/// Read-only text panel for `file_content` results.
#[component]
pub fn FileViewer(content: String, on_close: Callback<()>) -> impl IntoView {
	view! {
		<div class="file-viewer">
			<button class="file-viewer-close" on:click=move |_| on_close.run(())>
				"X"
			</button>
			<pre class="file-viewer-body">{content}</pre>
		</div>
	}
}
