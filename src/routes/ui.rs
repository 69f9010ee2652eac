use axum::{response::Html, routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Drug Repurposing Assistant</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem; color: #1d1d1f; max-width: 900px; }
    h1 { margin-bottom: 0.5rem; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    input, textarea { width: 100%; padding: 0.5rem; box-sizing: border-box; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; }
    pre { background: #f6f8fa; padding: 1rem; overflow: auto; white-space: pre-wrap; }
    .agent { display: inline-block; margin: 0.2rem; padding: 0.3rem 0.6rem; border-radius: 6px; background: #eee; }
    .agent.done { background: #d4edda; }
    .agent.failed { background: #f8d7da; }
    a.report { display: inline-block; margin-right: 1rem; }
  </style>
</head>
<body>
  <h1>Drug Repurposing Assistant</h1>
  <p>Name a molecule and six specialist agents will assess market, trade, patent, clinical, internal, and web intelligence.</p>

  <div class="card">
    <h2>1) Ask</h2>
    <label>Molecule</label>
    <input id="molecule" placeholder="Metformin" />
    <label>Question</label>
    <textarea id="message" rows="3" placeholder="Metformin repurposing opportunities in oncology"></textarea>
    <button id="runBtn">Run analysis</button>
  </div>

  <div class="card">
    <h2>2) Progress</h2>
    <div id="agents">
      <span class="agent" data-k="market">market</span>
      <span class="agent" data-k="trade">trade</span>
      <span class="agent" data-k="patents">patents</span>
      <span class="agent" data-k="trials">trials</span>
      <span class="agent" data-k="internal">internal</span>
      <span class="agent" data-k="web">web</span>
    </div>
    <div id="step"></div>
  </div>

  <div class="card">
    <h2>3) Result</h2>
    <div id="reports"></div>
    <pre id="output"></pre>
  </div>

  <script>
    const runBtn = document.getElementById('runBtn');
    const output = document.getElementById('output');
    const step = document.getElementById('step');
    const reports = document.getElementById('reports');
    let pollTimer = null;

    function paintProgress(ws) {
      if (!ws) return;
      step.textContent = 'Step: ' + ws.current_step;
      document.querySelectorAll('.agent').forEach(el => {
        el.classList.remove('done', 'failed');
        if (ws.agents_completed.includes(el.dataset.k)) el.classList.add('done');
        if (ws.agents_failed.includes(el.dataset.k)) el.classList.add('failed');
      });
    }

    async function poll(jobId) {
      const res = await fetch('/api/chat/status/' + jobId);
      if (!res.ok) { output.textContent = 'Status error: ' + res.status; return; }
      const job = await res.json();
      paintProgress(job.workflow_state);
      if (job.status === 'completed' && job.result) {
        clearInterval(pollTimer);
        output.textContent = JSON.stringify(job.result.data, null, 2);
        if (job.result.report_paths) {
          const p = job.result.report_paths;
          reports.innerHTML =
            '<a class="report" href="/api/reports/pdf/' + p.pdf + '">Download PDF</a>' +
            '<a class="report" href="/api/reports/excel/' + p.excel + '">Download Excel</a>';
        }
      } else if (job.status === 'failed') {
        clearInterval(pollTimer);
        output.textContent = 'Job failed: ' + (job.error || 'unknown error');
      }
    }

    runBtn.addEventListener('click', async () => {
      output.textContent = '';
      reports.innerHTML = '';
      if (pollTimer) clearInterval(pollTimer);
      const body = {
        message: document.getElementById('message').value || document.getElementById('molecule').value,
        molecule: document.getElementById('molecule').value || null,
        session_id: 'ui'
      };
      const res = await fetch('/api/chat/start', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) { output.textContent = 'Start error: ' + res.status; return; }
      const job = await res.json();
      step.textContent = 'Job ' + job.job_id + ' started';
      pollTimer = setInterval(() => poll(job.job_id), 1000);
    });
  </script>
</body>
</html>"#)
}
