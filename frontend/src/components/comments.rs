//! Comment thread of the watch page. Everything is held in memory for the
//! current session; nothing is written back.

use crate::components::video_card::Avatar;
use crate::models::Comment;
use crate::utils::{format_number, format_time_ago_now};
use chrono::Utc;
use std::collections::HashMap;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentThread {
    pub comments: Vec<Comment>,
    reactions: HashMap<String, Reaction>,
    next_local_id: u32,
}

pub enum CommentAction {
    Load(Vec<Comment>),
    Add { text: String, timestamp: String },
    React { id: String, reaction: Reaction },
}

fn find_mut<'a>(comments: &'a mut [Comment], id: &str) -> Option<&'a mut Comment> {
    for comment in comments {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(reply) = find_mut(&mut comment.replies, id) {
            return Some(reply);
        }
    }
    None
}

fn adjust(comment: &mut Comment, reaction: Reaction, add: bool) {
    let count = match reaction {
        Reaction::Like => &mut comment.likes,
        Reaction::Dislike => &mut comment.dislikes,
    };
    *count = if add {
        count.saturating_add(1)
    } else {
        count.saturating_sub(1)
    };
}

impl CommentThread {
    pub fn reaction(&self, id: &str) -> Option<Reaction> {
        self.reactions.get(id).copied()
    }

    pub fn total(&self) -> usize {
        self.comments
            .iter()
            .map(|comment| 1 + comment.replies.len())
            .sum()
    }

    fn load(&mut self, mut comments: Vec<Comment>) {
        // Pinned comments first, otherwise file order
        comments.sort_by_key(|comment| !comment.is_pinned);
        self.comments = comments;
        self.reactions.clear();
    }

    fn add(&mut self, text: String, timestamp: String) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.next_local_id += 1;
        let comment = Comment {
            id: format!("local-{}", self.next_local_id),
            author: "You".to_string(),
            text: text.to_string(),
            timestamp: Some(timestamp),
            ..Comment::default()
        };
        let insert_at = self
            .comments
            .iter()
            .take_while(|comment| comment.is_pinned)
            .count();
        self.comments.insert(insert_at, comment);
    }

    /// Same reaction twice undoes it; the other reaction replaces it.
    fn react(&mut self, id: &str, reaction: Reaction) {
        let previous = self.reactions.get(id).copied();
        let Some(comment) = find_mut(&mut self.comments, id) else {
            log::warn!("Reaction on unknown comment '{id}'");
            return;
        };
        if let Some(previous) = previous {
            adjust(comment, previous, false);
        }
        if previous == Some(reaction) {
            self.reactions.remove(id);
        } else {
            adjust(comment, reaction, true);
            self.reactions.insert(id.to_string(), reaction);
        }
    }
}

impl Reducible for CommentThread {
    type Action = CommentAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            CommentAction::Load(comments) => next.load(comments),
            CommentAction::Add { text, timestamp } => next.add(text, timestamp),
            CommentAction::React { id, reaction } => next.react(&id, reaction),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct CommentCardProps {
    pub comment: Comment,
    pub reaction: Option<Reaction>,
    pub on_react: Callback<(String, Reaction)>,
    /// Reaction lookup for replies.
    pub thread: Rc<CommentThread>,
    #[prop_or_default]
    pub is_reply: bool,
}

#[function_component(CommentCard)]
pub fn comment_card(props: &CommentCardProps) -> Html {
    let comment = &props.comment;
    let show_replies = use_state(|| false);

    let react = |reaction: Reaction| {
        let on_react = props.on_react.clone();
        let id = comment.id.clone();
        Callback::from(move |_: MouseEvent| on_react.emit((id.clone(), reaction)))
    };
    let toggle_replies = {
        let show_replies = show_replies.clone();
        Callback::from(move |_: MouseEvent| show_replies.set(!*show_replies))
    };
    let active = |reaction: Reaction| {
        if props.reaction == Some(reaction) {
            "text-blue-400"
        } else {
            "text-white"
        }
    };
    let reply_count = comment.replies.len();
    let avatar_size = if props.is_reply { "h-6 w-6 text-xs" } else { "h-10 w-10 text-base" };

    html! {
        <div class="flex gap-3">
            <Avatar name={comment.author.clone()} src={comment.author_avatar.clone()} size={avatar_size} />
            <div class="min-w-0 flex-1">
                if comment.is_pinned {
                    <p class="mb-1 text-xs font-medium text-gray-400">{"📌 Pinned"}</p>
                }
                <div class="mb-1 flex items-center gap-2">
                    <span class="text-[13px] font-semibold text-white">{ &comment.author }</span>
                    <span class="text-xs text-gray-400">{ format_time_ago_now(comment.timestamp.as_deref()) }</span>
                </div>
                <p class="mb-2 whitespace-pre-wrap text-sm text-white">{ &comment.text }</p>
                <div class="flex items-center gap-4 text-xs">
                    <button type="button" onclick={react(Reaction::Like)}
                        class={classes!("flex", "items-center", "gap-1", active(Reaction::Like))}>
                        {"👍"}<span class="text-gray-400">{ format_number(comment.likes) }</span>
                    </button>
                    <button type="button" onclick={react(Reaction::Dislike)}
                        class={classes!("flex", "items-center", "gap-1", active(Reaction::Dislike))}>
                        {"👎"}
                        if comment.dislikes > 0 {
                            <span class="text-gray-400">{ format_number(comment.dislikes) }</span>
                        }
                    </button>
                </div>
                if reply_count > 0 {
                    <button type="button" onclick={toggle_replies}
                        class="mt-2 text-sm font-semibold text-blue-400 hover:text-blue-300">
                        { format!("{} {reply_count} {}", if *show_replies { "▲" } else { "▼" },
                                  if reply_count == 1 { "reply" } else { "replies" }) }
                    </button>
                }
                if *show_replies {
                    <div class="mt-3 flex flex-col gap-4">
                        { for comment.replies.iter().map(|reply| html! {
                            <CommentCard
                                key={reply.id.clone()}
                                comment={reply.clone()}
                                reaction={props.thread.reaction(&reply.id)}
                                on_react={props.on_react.clone()}
                                thread={props.thread.clone()}
                                is_reply=true />
                        })}
                    </div>
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CommentSectionProps {
    pub comments: Vec<Comment>,
}

#[function_component(CommentSection)]
pub fn comment_section(props: &CommentSectionProps) -> Html {
    let thread = use_reducer(CommentThread::default);
    let draft = use_state(String::new);

    {
        let thread = thread.clone();
        use_effect_with(props.comments.clone(), move |comments| {
            thread.dispatch(CommentAction::Load(comments.clone()));
            || ()
        });
    }

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            draft.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let thread = thread.clone();
        let draft = draft.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            thread.dispatch(CommentAction::Add {
                text: (*draft).clone(),
                timestamp: Utc::now().to_rfc3339(),
            });
            draft.set(String::new());
        })
    };

    let on_react = {
        let thread = thread.clone();
        Callback::from(move |(id, reaction): (String, Reaction)| {
            thread.dispatch(CommentAction::React { id, reaction });
        })
    };

    let snapshot = Rc::new((*thread).clone());

    html! {
        <section class="mt-6">
            <h2 class="mb-6 text-xl font-semibold text-white">
                { format!("{} Comments", format_number(thread.total() as u64)) }
            </h2>
            <form class="mb-8 flex items-center gap-3" onsubmit={on_submit}>
                <Avatar name="You" size="h-10 w-10 text-base" />
                <input
                    type="text"
                    class="flex-1 border-b border-gray-600 bg-transparent py-1 text-sm text-white placeholder-gray-400 focus:border-white focus:outline-none"
                    placeholder="Add a comment..."
                    value={(*draft).clone()}
                    oninput={on_input}
                />
                <button type="submit" disabled={draft.trim().is_empty()}
                    class="rounded-full bg-blue-500 px-4 py-1.5 text-sm font-semibold text-black disabled:bg-gray-700 disabled:text-gray-400">
                    {"Comment"}
                </button>
            </form>
            if thread.comments.is_empty() {
                <p class="text-gray-400">{"No comments yet. Be the first to comment!"}</p>
            } else {
                <div class="flex flex-col gap-6">
                    { for thread.comments.iter().map(|comment| html! {
                        <CommentCard
                            key={comment.id.clone()}
                            comment={comment.clone()}
                            reaction={thread.reaction(&comment.id)}
                            on_react={on_react.clone()}
                            thread={snapshot.clone()} />
                    })}
                </div>
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str, likes: u64, pinned: bool) -> Comment {
        Comment {
            id: id.to_string(),
            author: "Someone".to_string(),
            text: format!("comment {id}"),
            likes,
            is_pinned: pinned,
            ..Comment::default()
        }
    }

    fn thread(comments: Vec<Comment>) -> CommentThread {
        let mut thread = CommentThread::default();
        thread.load(comments);
        thread
    }

    #[test]
    fn pinned_comments_come_first() {
        let thread = thread(vec![comment("a", 0, false), comment("b", 0, true)]);
        let ids: Vec<_> = thread.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn like_and_dislike_are_exclusive_per_comment() {
        let mut thread = thread(vec![comment("a", 5, false)]);

        thread.react("a", Reaction::Like);
        assert_eq!(thread.comments[0].likes, 6);

        thread.react("a", Reaction::Dislike);
        assert_eq!(thread.comments[0].likes, 5);
        assert_eq!(thread.comments[0].dislikes, 1);
        assert_eq!(thread.reaction("a"), Some(Reaction::Dislike));

        thread.react("a", Reaction::Dislike);
        assert_eq!(thread.comments[0].dislikes, 0);
        assert_eq!(thread.reaction("a"), None);
    }

    #[test]
    fn replies_can_be_reacted_to() {
        let mut parent = comment("a", 0, false);
        parent.replies.push(comment("a-1", 2, false));
        let mut thread = thread(vec![parent]);

        thread.react("a-1", Reaction::Like);
        assert_eq!(thread.comments[0].replies[0].likes, 3);
        assert_eq!(thread.total(), 2);
    }

    #[test]
    fn new_comments_go_below_pinned_ones() {
        let mut thread = thread(vec![comment("pin", 0, true), comment("a", 0, false)]);
        thread.add("  hello  ".to_string(), "2025-01-01T00:00:00Z".to_string());
        thread.add("   ".to_string(), "2025-01-01T00:00:00Z".to_string());

        assert_eq!(thread.comments.len(), 3);
        assert_eq!(thread.comments[1].text, "hello");
        assert_eq!(thread.comments[1].author, "You");
    }
}
