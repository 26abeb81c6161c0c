//! # Pool de Workers de Conexiones
//! src/server/pool.rs
//!
//! Implementa el conjunto fijo de workers que atiende las conexiones
//! aceptadas. Los trabajos entran por una cola acotada protegida con
//! `Mutex` + `Condvar`; cuando la cola está llena el encolado se rechaza
//! y el accept loop responde 503.
//!
//! Al apagar, los workers terminan los trabajos ya encolados y salen.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

/// Trabajo que ejecuta un worker (una conexión de principio a fin)
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Errores al encolar un trabajo
#[derive(Debug, PartialEq, Eq)]
pub enum PoolError {
    /// La cola alcanzó su capacidad máxima
    QueueFull,

    /// El pool ya está en proceso de apagado
    ShuttingDown,
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::QueueFull => write!(f, "Worker queue is full"),
            PoolError::ShuttingDown => write!(f, "Worker pool is shutting down"),
        }
    }
}

impl std::error::Error for PoolError {}

/// Estado compartido entre el pool y sus workers
struct PoolState {
    /// Cola FIFO de trabajos pendientes
    queue: VecDeque<Job>,

    /// Bandera de apagado: los workers drenan la cola y salen
    shutting_down: bool,
}

/// Pool de tamaño fijo con cola acotada
pub struct WorkerPool {
    state: Arc<(Mutex<PoolState>, Condvar)>,
    workers: Vec<JoinHandle<()>>,
    max_capacity: usize,
}

impl WorkerPool {
    /// Crea el pool y lanza `workers` threads que esperan trabajos
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        let state = Arc::new((
            Mutex::new(PoolState {
                queue: VecDeque::new(),
                shutting_down: false,
            }),
            Condvar::new(),
        ));

        let handles = (0..workers)
            .map(|id| {
                let state = Arc::clone(&state);
                thread::Builder::new()
                    .name(format!("worker-{}", id))
                    .spawn(move || Self::worker_loop(state))
                    .expect("spawn worker thread")
            })
            .collect();

        Self {
            state,
            workers: handles,
            max_capacity: queue_capacity,
        }
    }

    /// Bucle de cada worker: tomar un trabajo, ejecutarlo, repetir
    fn worker_loop(state: Arc<(Mutex<PoolState>, Condvar)>) {
        let (lock, condvar) = &*state;

        loop {
            let job = {
                let mut guard = lock.lock().unwrap();
                loop {
                    if let Some(job) = guard.queue.pop_front() {
                        break job;
                    }
                    // Cola vacía: salir solo si ya estamos apagando
                    if guard.shutting_down {
                        return;
                    }
                    guard = condvar.wait(guard).unwrap();
                }
            };

            // El lock se suelta antes de ejecutar el trabajo
            job();
        }
    }

    /// Intenta encolar un trabajo sin bloquear
    ///
    /// Retorna error si la cola está llena (el caller decide la política
    /// de backpressure) o si el pool se está apagando.
    pub fn try_execute<F>(&self, job: F) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'static,
    {
        let (lock, condvar) = &*self.state;
        let mut guard = lock.lock().unwrap();

        if guard.shutting_down {
            return Err(PoolError::ShuttingDown);
        }
        if guard.queue.len() >= self.max_capacity {
            return Err(PoolError::QueueFull);
        }

        guard.queue.push_back(Box::new(job));
        condvar.notify_one();

        Ok(())
    }

    /// Cantidad de trabajos esperando en la cola
    pub fn queue_len(&self) -> usize {
        let (lock, _) = &*self.state;
        lock.lock().unwrap().queue.len()
    }

    /// Capacidad máxima de la cola
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Apaga el pool: los workers drenan la cola pendiente y terminan
    pub fn shutdown(&mut self) {
        let (lock, condvar) = &*self.state;
        {
            let mut guard = lock.lock().unwrap();
            guard.shutting_down = true;
        }
        condvar.notify_all();

        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
