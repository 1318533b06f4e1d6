use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::api::{ApiClient, Article, Repository, RequestError};
use crate::view::{ArticlesQuery, FetchTicket, ListController, ReposQuery, TrendingItem};

/// A request issued by one of the list pages
#[derive(Debug, Clone, PartialEq)]
pub enum FetchJob {
    Repos(FetchTicket<ReposQuery>),
    Articles(FetchTicket<ArticlesQuery>),
}

/// A finished request, tagged with the ticket it answers
#[derive(Debug)]
pub enum FetchOutcome {
    Repos {
        seq: u64,
        result: Result<Vec<Repository>, RequestError>,
    },
    Articles {
        seq: u64,
        result: Result<Vec<Article>, RequestError>,
    },
}

/// Items that know how to wrap their own fetch result
pub trait Deliver: TrendingItem {
    fn deliver(seq: u64, result: Result<Vec<Self>, RequestError>) -> FetchOutcome;
}

impl Deliver for Repository {
    fn deliver(seq: u64, result: Result<Vec<Self>, RequestError>) -> FetchOutcome {
        FetchOutcome::Repos { seq, result }
    }
}

impl Deliver for Article {
    fn deliver(seq: u64, result: Result<Vec<Self>, RequestError>) -> FetchOutcome {
        FetchOutcome::Articles { seq, result }
    }
}

type Sink = Arc<dyn Fn(FetchOutcome) + Send + Sync>;

/// Runs fetch jobs as background tasks.
///
/// Each page has one request slot: dispatching a new job aborts the task still
/// running for that page. Results go to `sink` and are fenced again by
/// sequence number in the controller, so an abort that loses the race is harmless.
pub struct Fetcher {
    client: ApiClient,
    sink: Sink,
    repos_task: Option<JoinHandle<()>>,
    articles_task: Option<JoinHandle<()>>,
}

impl Fetcher {
    pub fn new(client: ApiClient, sink: impl Fn(FetchOutcome) + Send + Sync + 'static) -> Self {
        Self {
            client,
            sink: Arc::new(sink),
            repos_task: None,
            articles_task: None,
        }
    }

    pub fn dispatch(&mut self, job: FetchJob) {
        match job {
            FetchJob::Repos(ticket) => {
                let handle = self.spawn::<Repository>(ticket);
                replace_task(&mut self.repos_task, handle);
            }
            FetchJob::Articles(ticket) => {
                let handle = self.spawn::<Article>(ticket);
                replace_task(&mut self.articles_task, handle);
            }
        }
    }

    fn spawn<T: Deliver>(&self, ticket: FetchTicket<T::Query>) -> JoinHandle<()> {
        let client = self.client.clone();
        let sink = self.sink.clone();
        tokio::spawn(async move {
            let result = T::fetch(&client, &ticket.query).await;
            sink(T::deliver(ticket.seq, result));
        })
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        for task in [self.repos_task.take(), self.articles_task.take()].into_iter().flatten() {
            task.abort();
        }
    }
}

fn replace_task(slot: &mut Option<JoinHandle<()>>, handle: JoinHandle<()>) {
    if let Some(previous) = slot.replace(handle) {
        previous.abort();
    }
}

/// Run one request to completion in the foreground (CLI mode)
pub async fn load<T: TrendingItem>(client: &ApiClient, controller: &mut ListController<T>, query: T::Query) {
    let ticket = controller.request(query);
    let result = T::fetch(client, &ticket.query).await;
    controller.complete(ticket.seq, result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{client, serve_once};
    use crate::filter::{SortBy, SortDirection};
    use crate::view::ViewState;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    fn repos_job(seq: u64) -> FetchJob {
        FetchJob::Repos(FetchTicket {
            seq,
            query: ReposQuery {
                sort_by: SortBy::Stars,
                sort_direction: SortDirection::Desc,
            },
        })
    }

    #[tokio::test]
    async fn test_dispatch_delivers_outcome() {
        let (base, _server) = serve_once(
            "200 OK",
            r#"[{"id":1,"fullName":"foo/bar","htmlUrl":"https://x/foo/bar","stargazersCount":120}]"#,
        )
        .await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut fetcher = Fetcher::new(client(&base), move |outcome| {
            let _ = tx.send(outcome);
        });

        fetcher.dispatch(repos_job(7));

        match rx.recv().await.unwrap() {
            FetchOutcome::Repos { seq, result } => {
                assert_eq!(seq, 7);
                assert_eq!(result.unwrap()[0].full_name, "foo/bar");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_new_job_aborts_previous() {
        // Accepts connections at the TCP level but never answers
        let hanging = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let hanging_base = format!("http://{}/api", hanging.local_addr().unwrap());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut fetcher = Fetcher::new(client(&hanging_base), move |outcome| {
            let _ = tx.send(outcome);
        });

        fetcher.dispatch(repos_job(1));
        let first = fetcher.repos_task.as_ref().unwrap().abort_handle();
        fetcher.dispatch(repos_job(2));
        let second = fetcher.repos_task.as_ref().unwrap().abort_handle();

        for _ in 0..50 {
            if first.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(first.is_finished());
        assert!(!second.is_finished());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_load_runs_to_ready() {
        let (base, _server) = serve_once("200 OK", "[]").await;
        let api = client(&base);
        let mut controller = ListController::<Repository>::new(api.backend_address());

        load(
            &api,
            &mut controller,
            ReposQuery {
                sort_by: SortBy::Stars,
                sort_direction: SortDirection::Asc,
            },
        )
        .await;

        assert_eq!(controller.state(), &ViewState::Ready(vec![]));
    }
}
